pub mod expiry;
pub mod identity;
pub mod payments;
pub mod rates;
pub mod shifts;
pub mod summary;

pub use expiry::{ExpirySweeper, SweepReport};
pub use identity::{AdminProfile, PlatformProfile};
pub use payments::PaymentService;
pub use rates::RateDirectory;
pub use shifts::ShiftService;
pub use summary::SummaryService;
