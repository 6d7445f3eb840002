use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rate directory entry (`user` collection). Never expires, never deleted.
/// The last-modified time lives on the stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    pub user_id: String,
    pub display_name: String,
    pub base_rate: i64,
    pub work_location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RateEntry {
    pub fn new(user_id: String, display_name: String, now: DateTime<Utc>) -> Self {
        RateEntry {
            user_id,
            display_name,
            base_rate: 0,
            work_location: None,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateUpdate {
    pub user_id: String,
    /// Used only when the entry does not exist yet.
    pub display_name: Option<String>,
    pub base_rate: i64,
    pub work_location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateUpdateBody {
    pub display_name: Option<String>,
    pub base_rate: i64,
    pub work_location: Option<String>,
}

impl RateUpdateBody {
    pub fn for_user(self, user_id: String) -> RateUpdate {
        RateUpdate {
            user_id,
            display_name: self.display_name,
            base_rate: self.base_rate,
            work_location: self.work_location,
        }
    }
}
