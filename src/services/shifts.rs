use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use crate::config::Config;
use crate::database::models::{
    ConfirmShiftEntry, ConfirmedShift, ShiftRequest, ShiftReviewRow, SubmitShiftRequestInput,
    WeekReview,
};
use crate::database::repositories::{ConfirmedShiftRepository, ShiftRequestRepository};
use crate::database::{Stored, Upserted};
use crate::domain::{WeekKey, WeekShifts, business_today};
use crate::services::identity::PlatformProfile;
use crate::services::payments::retention_deadline;
use crate::services::rates::RateDirectory;

#[derive(Clone)]
pub struct ShiftService {
    requests: ShiftRequestRepository,
    confirmations: ConfirmedShiftRepository,
    rates: RateDirectory,
    config: Config,
}

impl ShiftService {
    pub fn new(
        requests: ShiftRequestRepository,
        confirmations: ConfirmedShiftRepository,
        rates: RateDirectory,
        config: Config,
    ) -> Self {
        Self {
            requests,
            confirmations,
            rates,
            config,
        }
    }

    fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        business_today(now, self.config.business_offset())
    }

    /// Week used when a caller names none: the one after the current week.
    pub fn default_week(&self, now: DateTime<Utc>) -> WeekKey {
        WeekKey::next(self.today(now))
    }

    pub async fn submit_request(
        &self,
        profile: &PlatformProfile,
        input: SubmitShiftRequestInput,
        now: DateTime<Utc>,
    ) -> Result<Upserted<ShiftRequest>> {
        let days = input.days.normalize(&self.config.work_locations)?;
        let week = input.week.unwrap_or_else(|| self.default_week(now));

        self.rates.ensure_user(profile, now).await?;

        let request = ShiftRequest {
            user_id: profile.user_id.clone(),
            display_name: profile.display_name.clone(),
            week,
            days,
            created_at: now,
        };

        let upserted = self
            .requests
            .upsert(
                &request,
                retention_deadline(now, self.config.record_retention_months),
            )
            .await?;

        log::info!(
            "Shift request for {} week {} saved ({} attending days)",
            request.user_id,
            week,
            request.days.attending_days()
        );

        Ok(upserted)
    }

    /// The caller's request for `week`, or an all-absent week when none
    /// was submitted.
    pub async fn request_days(&self, user_id: &str, week: WeekKey) -> Result<WeekShifts> {
        Ok(self
            .requests
            .find(user_id, week)
            .await?
            .map(|stored| stored.record.days)
            .unwrap_or_default())
    }

    /// One row per user who asked for shifts in `week`. Users without a
    /// saved confirmation get their request copied as the starting point.
    pub async fn review_week(&self, week: WeekKey) -> Result<WeekReview> {
        let requests = self.requests.list_for_week(week).await?;
        let mut confirmations: HashMap<String, ConfirmedShift> = self
            .confirmations
            .list_for_week(week)
            .await?
            .into_iter()
            .map(|stored| (stored.record.user_id.clone(), stored.record))
            .collect();

        let mut rows: Vec<ShiftReviewRow> = requests
            .into_iter()
            .map(|stored| {
                let request = stored.record;
                match confirmations.remove(&request.user_id) {
                    Some(confirmed) => ShiftReviewRow {
                        user_id: request.user_id,
                        display_name: request.display_name,
                        desired: request.days,
                        confirmed: confirmed.days,
                        saved: true,
                    },
                    None => ShiftReviewRow {
                        user_id: request.user_id,
                        display_name: request.display_name,
                        confirmed: request.days.clone(),
                        desired: request.days,
                        saved: false,
                    },
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        Ok(WeekReview { week, rows })
    }

    async fn resolve_display_name(
        &self,
        entry: &ConfirmShiftEntry,
        week: WeekKey,
    ) -> Result<String> {
        if let Some(name) = entry.display_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return Ok(name.to_string());
        }
        if let Some(request) = self.requests.find(&entry.user_id, week).await? {
            return Ok(request.record.display_name);
        }
        Ok(self
            .rates
            .entry(&entry.user_id)
            .await?
            .map_or_else(|| entry.user_id.clone(), |rate| rate.display_name))
    }

    pub async fn save_confirmation(
        &self,
        admin: &PlatformProfile,
        week: WeekKey,
        entry: ConfirmShiftEntry,
        now: DateTime<Utc>,
    ) -> Result<Upserted<ConfirmedShift>> {
        let display_name = self.resolve_display_name(&entry, week).await?;
        let days = entry.days.normalize(&self.config.work_locations)?;

        let confirmation = ConfirmedShift {
            user_id: entry.user_id,
            display_name,
            week,
            days,
            created_at: now,
            confirmed_by: admin.user_id.clone(),
        };

        self.confirmations
            .upsert(
                &confirmation,
                retention_deadline(now, self.config.record_retention_months),
            )
            .await
    }

    /// Saves confirmations one user at a time. Entries are checked up front;
    /// a write failure part way leaves earlier users saved.
    pub async fn save_confirmations(
        &self,
        admin: &PlatformProfile,
        week: WeekKey,
        entries: Vec<ConfirmShiftEntry>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Stored<ConfirmedShift>>> {
        for entry in &entries {
            entry.days.clone().normalize(&self.config.work_locations)?;
        }

        let mut saved = Vec::with_capacity(entries.len());
        for entry in entries {
            let user_id = entry.user_id.clone();
            let upserted = self
                .save_confirmation(admin, week, entry, now)
                .await
                .map_err(|e| {
                    e.context(format!(
                        "Confirming week {} for {} failed after {} successful writes",
                        week,
                        user_id,
                        saved.len()
                    ))
                })?;
            saved.push(upserted.record);
        }

        log::info!(
            "{} confirmed {} shift(s) for week {}",
            admin.user_id,
            saved.len(),
            week
        );
        Ok(saved)
    }

    /// All saved confirmations for `week`, for read-only display.
    pub async fn published(&self, week: WeekKey) -> Result<Vec<Stored<ConfirmedShift>>> {
        let mut confirmations = self.confirmations.list_for_week(week).await?;
        confirmations.sort_by(|a, b| a.record.display_name.cmp(&b.record.display_name));
        Ok(confirmations)
    }

    pub async fn my_confirmation(
        &self,
        user_id: &str,
        week: WeekKey,
    ) -> Result<Option<Stored<ConfirmedShift>>> {
        self.confirmations.find(user_id, week).await
    }
}
