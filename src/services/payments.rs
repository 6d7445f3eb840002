use anyhow::Result;
use chrono::{DateTime, Months, NaiveDate, Utc};

use crate::config::Config;
use crate::database::models::{PaymentRecord, SubmitPaymentInput};
use crate::database::repositories::PaymentRepository;
use crate::database::{Stored, Upserted};
use crate::domain::{business_today, check_business_date, compute_amount};
use crate::services::identity::PlatformProfile;
use crate::services::rates::RateDirectory;

/// Expiry stamped on newly written business records.
pub fn retention_deadline(now: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
    now.checked_add_months(Months::new(months))
}

/// Reads and writes the one-per-day settlement records.
#[derive(Clone)]
pub struct PaymentService {
    payments: PaymentRepository,
    rates: RateDirectory,
    config: Config,
}

impl PaymentService {
    pub fn new(payments: PaymentRepository, rates: RateDirectory, config: Config) -> Self {
        Self {
            payments,
            rates,
            config,
        }
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        business_today(now, self.config.business_offset())
    }

    /// Creates or overwrites the caller's record for the work date, pricing
    /// it with the base rate currently in the rate directory.
    pub async fn submit(
        &self,
        profile: &PlatformProfile,
        input: SubmitPaymentInput,
        now: DateTime<Utc>,
    ) -> Result<Upserted<PaymentRecord>> {
        let work_date = match input.work_date {
            Some(date) => check_business_date(date)?,
            None => self.today(now),
        };

        let entry = self.rates.ensure_user(profile, now).await?;
        let amount = compute_amount(
            input.mileage,
            input.toll_fee,
            input.hour_adjustment,
            entry.base_rate,
        )?;

        let record = PaymentRecord {
            user_id: profile.user_id.clone(),
            display_name: profile.display_name.clone(),
            work_date,
            mileage: input.mileage,
            toll_fee: input.toll_fee,
            hour_adjustment: input.hour_adjustment,
            base_rate: entry.base_rate,
            amount,
            created_at: now,
        };

        let upserted = self
            .payments
            .upsert(
                &record,
                retention_deadline(now, self.config.record_retention_months),
            )
            .await?;

        log::info!(
            "{} payment record for {} on {} (amount {})",
            if upserted.created { "Created" } else { "Updated" },
            record.user_id,
            record.work_date,
            record.amount
        );

        Ok(upserted)
    }

    pub async fn for_day(
        &self,
        user_id: &str,
        work_date: NaiveDate,
    ) -> Result<Option<Stored<PaymentRecord>>> {
        self.payments.find_for_day(user_id, work_date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use crate::database::models::RateUpdate;
    use crate::database::repositories::RateRepository;
    use crate::database::{DocumentStore, MemoryDocumentStore};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn config() -> Config {
        Config {
            database_url: String::new(),
            storage_backend: StorageBackend::Memory,
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            client_base_url: String::new(),
            platform_channel_id: String::new(),
            platform_channel_secret: String::new(),
            platform_issuer: String::new(),
            admin_user_ids: vec![],
            work_locations: vec!["main_office".to_string()],
            utc_offset_minutes: 540,
            record_retention_months: 3,
        }
    }

    fn service() -> (PaymentService, RateDirectory) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let config = config();
        let rates = RateDirectory::new(
            RateRepository::new(store.clone()),
            config.work_locations.clone(),
        );
        let service = PaymentService::new(PaymentRepository::new(store), rates.clone(), config);
        (service, rates)
    }

    fn driver() -> PlatformProfile {
        PlatformProfile {
            user_id: "U1".to_string(),
            display_name: "Taro".to_string(),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn submit_prices_with_the_stored_base_rate() {
        let (service, rates) = service();
        let now = Utc.with_ymd_and_hms(2025, 10, 14, 16, 30, 0).unwrap();
        rates
            .save(
                RateUpdate {
                    user_id: "U1".to_string(),
                    display_name: Some("Taro".to_string()),
                    base_rate: 8000,
                    work_location: None,
                },
                now,
            )
            .await
            .unwrap();

        let upserted = service
            .submit(
                &driver(),
                SubmitPaymentInput {
                    mileage: 70.0,
                    toll_fee: 1950,
                    hour_adjustment: 0.0,
                    work_date: None,
                },
                now,
            )
            .await
            .unwrap();

        assert!(upserted.created);
        assert_eq!(upserted.record.record.amount, 10950);
        assert_eq!(upserted.record.record.base_rate, 8000);
        // 16:30 UTC is already the next day at +09:00
        assert_eq!(
            upserted.record.record.work_date,
            NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
        );
        assert_eq!(
            upserted.record.expire_at,
            Some(Utc.with_ymd_and_hms(2026, 1, 14, 16, 30, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn resubmitting_the_same_day_overwrites() {
        let (service, _) = service();
        let now = Utc::now();
        let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();

        for mileage in [14.0, 21.0] {
            service
                .submit(
                    &driver(),
                    SubmitPaymentInput {
                        mileage,
                        toll_fee: 0,
                        hour_adjustment: 0.0,
                        work_date: Some(date),
                    },
                    now,
                )
                .await
                .unwrap();
        }

        let stored = service.for_day("U1", date).await.unwrap().unwrap();
        assert_eq!(stored.record.mileage, 21.0);
        assert_eq!(stored.record.amount, 300);
    }

    #[tokio::test]
    async fn invalid_input_is_not_stored() {
        let (service, _) = service();
        let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let result = service
            .submit(
                &driver(),
                SubmitPaymentInput {
                    mileage: -3.0,
                    toll_fee: 0,
                    hour_adjustment: 0.0,
                    work_date: Some(date),
                },
                Utc::now(),
            )
            .await;

        assert!(result.is_err());
        assert!(service.for_day("U1", date).await.unwrap().is_none());
    }
}
