use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use super::store::{Collection, Document, DocumentStore, Filter};

/// A record together with its document bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: T,
    pub expire_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl<T: DeserializeOwned> TryFrom<Document> for Stored<T> {
    type Error = anyhow::Error;

    fn try_from(document: Document) -> Result<Self> {
        Ok(Stored {
            record: document.parse()?,
            id: document.id,
            expire_at: document.expire_at,
            updated_at: document.updated_at,
        })
    }
}

/// Outcome of a keyed upsert.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Upserted<T> {
    pub record: Stored<T>,
    pub created: bool,
}

/// Typed view of one collection of a [`DocumentStore`].
pub struct TypedCollection<T> {
    store: Arc<dyn DocumentStore>,
    collection: Collection,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for TypedCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            collection: self.collection,
            _record: PhantomData,
        }
    }
}

impl<T> TypedCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn DocumentStore>, collection: Collection) -> Self {
        Self {
            store,
            collection,
            _record: PhantomData,
        }
    }

    pub async fn find(&self, filter: &Filter) -> Result<Vec<Stored<T>>> {
        self.store
            .find(self.collection, filter)
            .await?
            .into_iter()
            .map(Stored::try_from)
            .collect()
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<Stored<T>>> {
        Ok(self.find(filter).await?.into_iter().next())
    }

    /// Overwrites the first document matching `key`, or inserts a new one.
    /// The whole body is replaced; fields are never merged.
    pub async fn upsert(
        &self,
        key: &Filter,
        record: &T,
        expire_at: Option<DateTime<Utc>>,
    ) -> Result<Upserted<T>> {
        let data = serde_json::to_value(record)?;

        if let Some(existing) = self.store.find(self.collection, key).await?.into_iter().next() {
            if let Some(updated) = self
                .store
                .update(self.collection, existing.id, data.clone(), expire_at)
                .await?
            {
                return Ok(Upserted {
                    record: updated.try_into()?,
                    created: false,
                });
            }
            // Removed between the lookup and the update; fall through and recreate.
        }

        let inserted = self.store.insert(self.collection, data, expire_at).await?;
        Ok(Upserted {
            record: inserted.try_into()?,
            created: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryDocumentStore;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Entry {
        user_id: String,
        value: i64,
    }

    fn entries() -> TypedCollection<Entry> {
        TypedCollection::new(Arc::new(MemoryDocumentStore::new()), Collection::User)
    }

    #[tokio::test]
    async fn upsert_twice_keeps_one_document_with_latest_values() {
        let collection = entries();
        let key = Filter::new().eq("userId", "U1");

        let first = collection
            .upsert(&key, &Entry { user_id: "U1".into(), value: 1 }, None)
            .await
            .unwrap();
        let second = collection
            .upsert(&key, &Entry { user_id: "U1".into(), value: 2 }, None)
            .await
            .unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.record.id, second.record.id);

        let all = collection.find(&Filter::new()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].record, Entry { user_id: "U1".into(), value: 2 });
    }

    #[tokio::test]
    async fn stored_serializes_flat() {
        let collection = entries();
        let key = Filter::new().eq("userId", "U2");
        let upserted = collection
            .upsert(&key, &Entry { user_id: "U2".into(), value: 5 }, None)
            .await
            .unwrap();

        let json = serde_json::to_value(&upserted.record).unwrap();
        assert_eq!(json["userId"], "U2");
        assert_eq!(json["value"], 5);
        assert!(json["id"].is_string());
    }
}
