pub mod payment;
pub mod rate;
pub mod weekly_shift;

// Re-export all models for easy importing
pub use payment::*;
pub use rate::*;
pub use weekly_shift::*;
