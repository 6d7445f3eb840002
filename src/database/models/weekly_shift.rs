use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{WeekKey, WeekShifts};

/// A worker's availability for one week (`desired_shift`). Keyed on (user, week).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRequest {
    pub user_id: String,
    pub display_name: String,
    pub week: WeekKey,
    pub days: WeekShifts,
    pub created_at: DateTime<Utc>,
}

/// The admin-approved schedule for one week (`confirmed_shift`).
/// Keyed on (user, week); published read-only once saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedShift {
    pub user_id: String,
    pub display_name: String,
    pub week: WeekKey,
    pub days: WeekShifts,
    pub created_at: DateTime<Utc>,
    pub confirmed_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitShiftRequestInput {
    /// Any date of the target week; defaults to next week.
    pub week: Option<WeekKey>,
    #[serde(default)]
    pub days: WeekShifts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmShiftEntry {
    pub user_id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub days: WeekShifts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConfirmationsInput {
    pub week: Option<WeekKey>,
    pub entries: Vec<ConfirmShiftEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmShiftBody {
    pub week: Option<WeekKey>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub days: WeekShifts,
}

/// One line of the admin review screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftReviewRow {
    pub user_id: String,
    pub display_name: String,
    pub desired: WeekShifts,
    pub confirmed: WeekShifts,
    /// False while `confirmed` is still the seeded copy of `desired`.
    pub saved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekReview {
    pub week: WeekKey,
    pub rows: Vec<ShiftReviewRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekQuery {
    pub week: Option<WeekKey>,
}
