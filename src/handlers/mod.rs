pub mod maintenance;
pub mod payments;
pub mod profile;
pub mod rates;
pub mod shared;
pub mod shifts;
pub mod summaries;
