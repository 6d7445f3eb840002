use std::sync::Arc;

use anyhow::Result;

use crate::database::models::RateEntry;
use crate::database::{Collection, DocumentStore, Filter, Stored, TypedCollection, Upserted};

#[derive(Clone)]
pub struct RateRepository {
    entries: TypedCollection<RateEntry>,
}

impl RateRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            entries: TypedCollection::new(store, Collection::User),
        }
    }

    fn user_key(user_id: &str) -> Filter {
        Filter::new().eq("userId", user_id)
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Option<Stored<RateEntry>>> {
        self.entries.find_one(&Self::user_key(user_id)).await
    }

    pub async fn list_all(&self) -> Result<Vec<Stored<RateEntry>>> {
        let mut entries = self.entries.find(&Filter::new()).await?;
        entries.sort_by(|a, b| {
            a.record
                .display_name
                .cmp(&b.record.display_name)
                .then_with(|| a.record.user_id.cmp(&b.record.user_id))
        });
        Ok(entries)
    }

    pub async fn upsert(&self, entry: &RateEntry) -> Result<Upserted<RateEntry>> {
        self.entries
            .upsert(&Self::user_key(&entry.user_id), entry, None)
            .await
    }
}
