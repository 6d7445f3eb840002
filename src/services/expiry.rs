use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::{Collection, DocumentStore};

/// Collections whose documents carry an expiry. The rate directory does not.
pub const EXPIRING_COLLECTIONS: [Collection; 3] = [
    Collection::DriverPayments,
    Collection::DesiredShift,
    Collection::ConfirmedShift,
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    pub driver_payments: u64,
    pub desired_shift: u64,
    pub confirmed_shift: u64,
}

impl SweepReport {
    pub fn total(&self) -> u64 {
        self.driver_payments + self.desired_shift + self.confirmed_shift
    }

    fn record(&mut self, collection: Collection, removed: u64) {
        match collection {
            Collection::DriverPayments => self.driver_payments += removed,
            Collection::DesiredShift => self.desired_shift += removed,
            Collection::ConfirmedShift => self.confirmed_shift += removed,
            Collection::User => {}
        }
    }
}

/// Deletes documents whose retention window has passed.
#[derive(Clone)]
pub struct ExpirySweeper {
    store: Arc<dyn DocumentStore>,
}

impl ExpirySweeper {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<SweepReport> {
        let mut report = SweepReport::default();

        for collection in EXPIRING_COLLECTIONS {
            let removed = self
                .store
                .delete_expired(collection, now)
                .await
                .with_context(|| format!("Sweeping expired {} documents", collection))?;
            report.record(collection, removed);
        }

        log::info!(
            "Expiry sweep on {} removed {} document(s): {:?}",
            self.store.backend_tag(),
            report.total(),
            report
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryDocumentStore;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn removes_only_past_expiries_and_never_users() {
        let store = MemoryDocumentStore::new();
        let now = Utc::now();
        let past = Some(now - Duration::days(1));
        let future = Some(now + Duration::days(1));

        store.insert(Collection::DriverPayments, json!({"n": 1}), past).await.unwrap();
        store.insert(Collection::DriverPayments, json!({"n": 2}), future).await.unwrap();
        store.insert(Collection::DriverPayments, json!({"n": 3}), None).await.unwrap();
        store.insert(Collection::DesiredShift, json!({"n": 4}), past).await.unwrap();
        store.insert(Collection::ConfirmedShift, json!({"n": 5}), past).await.unwrap();
        store.insert(Collection::User, json!({"n": 6}), past).await.unwrap();

        let sweeper = ExpirySweeper::new(Arc::new(store.clone()));
        let report = sweeper.sweep(now).await.unwrap();

        assert_eq!(
            report,
            SweepReport {
                driver_payments: 1,
                desired_shift: 1,
                confirmed_shift: 1,
            }
        );
        assert_eq!(store.len(Collection::DriverPayments).await, 2);
        assert_eq!(store.len(Collection::User).await, 1);

        assert_eq!(sweeper.sweep(now).await.unwrap().total(), 0);
    }
}
