pub mod confirmed_shift;
pub mod payment;
pub mod rate;
pub mod shift_request;

// Re-export all repositories for easy importing
pub use confirmed_shift::ConfirmedShiftRepository;
pub use payment::PaymentRepository;
pub use rate::RateRepository;
pub use shift_request::ShiftRequestRepository;
