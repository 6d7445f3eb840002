use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use crate::database::models::PaymentRecord;
use crate::database::{Collection, DocumentStore, Filter, Stored, TypedCollection, Upserted};

#[derive(Clone)]
pub struct PaymentRepository {
    payments: TypedCollection<PaymentRecord>,
}

impl PaymentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            payments: TypedCollection::new(store, Collection::DriverPayments),
        }
    }

    fn day_key(user_id: &str, work_date: NaiveDate) -> Filter {
        Filter::new().eq("userId", user_id).eq("workDate", work_date)
    }

    pub async fn find_for_day(
        &self,
        user_id: &str,
        work_date: NaiveDate,
    ) -> Result<Option<Stored<PaymentRecord>>> {
        self.payments
            .find_one(&Self::day_key(user_id, work_date))
            .await
    }

    pub async fn upsert(
        &self,
        record: &PaymentRecord,
        expire_at: Option<DateTime<Utc>>,
    ) -> Result<Upserted<PaymentRecord>> {
        self.payments
            .upsert(
                &Self::day_key(&record.user_id, record.work_date),
                record,
                expire_at,
            )
            .await
    }

    /// Records of one user between `from` and `to` inclusive, by work date.
    pub async fn list_for_user_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Stored<PaymentRecord>>> {
        let mut records: Vec<_> = self
            .payments
            .find(&Filter::new().eq("userId", user_id))
            .await?
            .into_iter()
            .filter(|p| p.record.work_date >= from && p.record.work_date <= to)
            .collect();

        records.sort_by_key(|p| p.record.work_date);
        Ok(records)
    }

    pub async fn list_all(&self) -> Result<Vec<Stored<PaymentRecord>>> {
        self.payments.find(&Filter::new()).await
    }
}
