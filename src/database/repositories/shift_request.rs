use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::database::models::ShiftRequest;
use crate::database::{Collection, DocumentStore, Filter, Stored, TypedCollection, Upserted};
use crate::domain::WeekKey;

#[derive(Clone)]
pub struct ShiftRequestRepository {
    requests: TypedCollection<ShiftRequest>,
}

impl ShiftRequestRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            requests: TypedCollection::new(store, Collection::DesiredShift),
        }
    }

    pub async fn find(&self, user_id: &str, week: WeekKey) -> Result<Option<Stored<ShiftRequest>>> {
        self.requests.find_one(&week_key(user_id, week)).await
    }

    pub async fn list_for_week(&self, week: WeekKey) -> Result<Vec<Stored<ShiftRequest>>> {
        self.requests.find(&Filter::new().eq("week", week)).await
    }

    pub async fn upsert(
        &self,
        request: &ShiftRequest,
        expire_at: Option<DateTime<Utc>>,
    ) -> Result<Upserted<ShiftRequest>> {
        self.requests
            .upsert(&week_key(&request.user_id, request.week), request, expire_at)
            .await
    }
}

pub(super) fn week_key(user_id: &str, week: WeekKey) -> Filter {
    Filter::new().eq("userId", user_id).eq("week", week)
}
