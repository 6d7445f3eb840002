use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::config::Config;
use crate::database::models::{
    DailyPayment, DriverInfo, MonthlyPaymentSummary, PaymentTotals, WeeklyPaymentSummary,
};
use crate::database::repositories::PaymentRepository;
use crate::domain::week::month_bounds;
use crate::domain::{DomainError, WeekKey, business_today};

/// Read-only aggregations over payment records.
#[derive(Clone)]
pub struct SummaryService {
    payments: PaymentRepository,
    config: Config,
}

impl SummaryService {
    pub fn new(payments: PaymentRepository, config: Config) -> Self {
        Self { payments, config }
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        business_today(now, self.config.business_offset())
    }

    /// Most recently completed week relative to `now`.
    pub fn default_week(&self, now: DateTime<Utc>) -> WeekKey {
        WeekKey::previous(self.today(now))
    }

    pub async fn monthly(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<MonthlyPaymentSummary> {
        let (from, to) = month_bounds(year, month).ok_or_else(|| {
            DomainError::InvalidInput(format!("{}-{} is not a valid month", year, month))
        })?;

        let records = self
            .payments
            .list_for_user_between(user_id, from, to)
            .await?;

        let mut totals = PaymentTotals::default();
        for stored in &records {
            totals.add(&stored.record);
        }

        Ok(MonthlyPaymentSummary {
            user_id: user_id.to_string(),
            year,
            month,
            from,
            to,
            records,
            totals,
        })
    }

    pub async fn current_month(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<MonthlyPaymentSummary> {
        let today = self.today(now);
        self.monthly(user_id, today.year(), today.month()).await
    }

    /// Seven entries, Monday first; days without a record carry `None`.
    pub async fn weekly(&self, user_id: &str, week: WeekKey) -> Result<WeeklyPaymentSummary> {
        let (from, to) = week.range();
        let mut by_date: BTreeMap<NaiveDate, _> = self
            .payments
            .list_for_user_between(user_id, from, to)
            .await?
            .into_iter()
            .map(|stored| (stored.record.work_date, stored))
            .collect();

        let mut totals = PaymentTotals::default();
        let days = week
            .days()
            .into_iter()
            .map(|date| {
                let record = by_date.remove(&date);
                if let Some(stored) = &record {
                    totals.add(&stored.record);
                }
                DailyPayment { date, record }
            })
            .collect();

        Ok(WeeklyPaymentSummary {
            user_id: user_id.to_string(),
            week,
            days,
            totals,
        })
    }

    /// Users that have at least one payment record. The display name comes
    /// from each user's most recent record.
    pub async fn drivers(&self) -> Result<Vec<DriverInfo>> {
        let mut latest: BTreeMap<String, (NaiveDate, DateTime<Utc>, String)> = BTreeMap::new();

        for stored in self.payments.list_all().await? {
            let record = stored.record;
            let stamp = (record.work_date, stored.updated_at);
            match latest.get_mut(&record.user_id) {
                Some(current) if (current.0, current.1) >= stamp => {}
                Some(current) => *current = (stamp.0, stamp.1, record.display_name),
                None => {
                    latest.insert(record.user_id, (stamp.0, stamp.1, record.display_name));
                }
            }
        }

        let mut drivers: Vec<DriverInfo> = latest
            .into_iter()
            .map(|(user_id, (_, _, display_name))| DriverInfo {
                user_id,
                display_name,
            })
            .collect();

        drivers.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        Ok(drivers)
    }
}
