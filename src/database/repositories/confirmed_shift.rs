use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};

use super::shift_request::week_key;
use crate::database::models::ConfirmedShift;
use crate::database::{Collection, DocumentStore, Filter, Stored, TypedCollection, Upserted};
use crate::domain::WeekKey;

#[derive(Clone)]
pub struct ConfirmedShiftRepository {
    confirmations: TypedCollection<ConfirmedShift>,
}

impl ConfirmedShiftRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            confirmations: TypedCollection::new(store, Collection::ConfirmedShift),
        }
    }

    pub async fn find(
        &self,
        user_id: &str,
        week: WeekKey,
    ) -> Result<Option<Stored<ConfirmedShift>>> {
        self.confirmations.find_one(&week_key(user_id, week)).await
    }

    pub async fn list_for_week(&self, week: WeekKey) -> Result<Vec<Stored<ConfirmedShift>>> {
        self.confirmations.find(&Filter::new().eq("week", week)).await
    }

    pub async fn upsert(
        &self,
        confirmation: &ConfirmedShift,
        expire_at: Option<DateTime<Utc>>,
    ) -> Result<Upserted<ConfirmedShift>> {
        self.confirmations
            .upsert(
                &week_key(&confirmation.user_id, confirmation.week),
                confirmation,
                expire_at,
            )
            .await
    }
}
