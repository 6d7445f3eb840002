pub mod amount;
pub mod shift;
pub mod week;

use thiserror::Error;

pub use amount::{check_base_rate, compute_amount};
pub use shift::{Attendance, ShiftDay, WeekShifts};
pub use week::{WeekKey, business_today, check_business_date, week_start};

/// Rule violations in submitted data. Surfaces to clients as 400.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown work location: {0}")]
    UnknownLocation(String),
}
