use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{Collection, Document, DocumentStore, Filter};

/// In-process document store for tests and `STORAGE_BACKEND=memory`.
/// Contents are lost on restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<Document>>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filter.matches(&document.data))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(
        &self,
        collection: Collection,
        data: Value,
        expire_at: Option<DateTime<Utc>>,
    ) -> Result<Document> {
        let now = Utc::now();
        let document = Document {
            id: Uuid::new_v4(),
            collection,
            data,
            expire_at,
            created_at: now,
            updated_at: now,
        };

        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(document.clone());

        Ok(document)
    }

    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        data: Value,
        expire_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Document>> {
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };

        document.data = data;
        document.expire_at = expire_at;
        document.updated_at = Utc::now();

        Ok(Some(document.clone()))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(false);
        };

        let before = documents.len();
        documents.retain(|d| d.id != id);
        Ok(documents.len() < before)
    }

    async fn delete_expired(&self, collection: Collection, now: DateTime<Utc>) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(0);
        };

        let before = documents.len();
        documents.retain(|d| d.expire_at.is_none_or(|expire_at| expire_at >= now));
        Ok((before - documents.len()) as u64)
    }
}
