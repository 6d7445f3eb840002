use std::sync::Arc;

pub mod config;
pub mod database;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;
pub use database::DocumentStore;
pub use services::{ExpirySweeper, PaymentService, RateDirectory, ShiftService, SummaryService};

use database::repositories::{
    ConfirmedShiftRepository, PaymentRepository, RateRepository, ShiftRequestRepository,
};

pub struct AppState {
    pub payments: PaymentService,
    pub rates: RateDirectory,
    pub shifts: ShiftService,
    pub summaries: SummaryService,
    pub sweeper: ExpirySweeper,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        let rates = RateDirectory::new(
            RateRepository::new(store.clone()),
            config.work_locations.clone(),
        );
        let payment_repository = PaymentRepository::new(store.clone());

        AppState {
            payments: PaymentService::new(
                payment_repository.clone(),
                rates.clone(),
                config.clone(),
            ),
            shifts: ShiftService::new(
                ShiftRequestRepository::new(store.clone()),
                ConfirmedShiftRepository::new(store.clone()),
                rates.clone(),
                config.clone(),
            ),
            summaries: SummaryService::new(payment_repository, config.clone()),
            sweeper: ExpirySweeper::new(store),
            rates,
        }
    }
}
