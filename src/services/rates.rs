use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::database::models::{RateEntry, RateUpdate};
use crate::database::repositories::RateRepository;
use crate::database::{Stored, Upserted};
use crate::domain::{DomainError, check_base_rate};
use crate::services::identity::PlatformProfile;

/// Admin-maintained mapping of user to display name, base daily rate and
/// work location.
#[derive(Clone)]
pub struct RateDirectory {
    repository: RateRepository,
    work_locations: Vec<String>,
}

impl RateDirectory {
    pub fn new(repository: RateRepository, work_locations: Vec<String>) -> Self {
        Self {
            repository,
            work_locations,
        }
    }

    /// Returns the caller's entry, creating it with a zero rate on first
    /// contact and refreshing the display name when it changed.
    pub async fn ensure_user(
        &self,
        profile: &PlatformProfile,
        now: DateTime<Utc>,
    ) -> Result<RateEntry> {
        match self.repository.find_by_user(&profile.user_id).await? {
            Some(existing) if existing.record.display_name == profile.display_name => {
                Ok(existing.record)
            }
            Some(existing) => {
                let mut entry = existing.record;
                entry.display_name = profile.display_name.clone();
                Ok(self.repository.upsert(&entry).await?.record.record)
            }
            None => {
                log::info!("Adding {} to the rate directory", profile.user_id);
                let entry = RateEntry::new(
                    profile.user_id.clone(),
                    profile.display_name.clone(),
                    now,
                );
                Ok(self.repository.upsert(&entry).await?.record.record)
            }
        }
    }

    pub async fn entry(&self, user_id: &str) -> Result<Option<RateEntry>> {
        Ok(self
            .repository
            .find_by_user(user_id)
            .await?
            .map(|stored| stored.record))
    }

    pub async fn list(&self) -> Result<Vec<Stored<RateEntry>>> {
        self.repository.list_all().await
    }

    fn validate(&self, update: &RateUpdate) -> Result<(), DomainError> {
        if update.user_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("user id is required".to_string()));
        }
        check_base_rate(update.base_rate)?;
        if let Some(location) = update.work_location.as_deref() {
            if !self.work_locations.iter().any(|known| known == location) {
                return Err(DomainError::UnknownLocation(location.to_string()));
            }
        }
        Ok(())
    }

    pub async fn save(&self, update: RateUpdate, now: DateTime<Utc>) -> Result<Upserted<RateEntry>> {
        self.validate(&update)?;

        let entry = match self.repository.find_by_user(&update.user_id).await? {
            Some(existing) => RateEntry {
                base_rate: update.base_rate,
                work_location: update.work_location,
                ..existing.record
            },
            None => {
                let display_name = update
                    .display_name
                    .clone()
                    .unwrap_or_else(|| update.user_id.clone());
                RateEntry {
                    base_rate: update.base_rate,
                    work_location: update.work_location,
                    ..RateEntry::new(update.user_id, display_name, now)
                }
            }
        };

        self.repository.upsert(&entry).await
    }

    /// Saves each update in turn. Nothing is rolled back if a later write
    /// fails; the error names how many were already stored.
    pub async fn save_many(
        &self,
        updates: Vec<RateUpdate>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Stored<RateEntry>>> {
        for update in &updates {
            self.validate(update)?;
        }

        let mut saved = Vec::with_capacity(updates.len());
        for update in updates {
            let user_id = update.user_id.clone();
            let upserted = self.save(update, now).await.map_err(|e| {
                e.context(format!(
                    "Saving rate for {} failed after {} successful writes",
                    user_id,
                    saved.len()
                ))
            })?;
            saved.push(upserted.record);
        }

        log::info!("Saved {} rate directory entries", saved.len());
        Ok(saved)
    }
}
