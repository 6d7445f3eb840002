use actix_web::web;

use crate::handlers::{maintenance, rates, shifts, summaries};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            // Rate directory
            .route("/users", web::get().to(rates::list_rates))
            .route("/users", web::put().to(rates::save_rates))
            .route("/users/{user_id}", web::put().to(rates::save_rate))
            // Shift confirmation
            .route("/shifts", web::get().to(shifts::review_week))
            .route("/shifts", web::put().to(shifts::save_confirmations))
            .route("/shifts/{user_id}", web::put().to(shifts::save_confirmation))
            // Driver payments
            .route("/payments/drivers", web::get().to(summaries::list_drivers))
            .route(
                "/payments/{user_id}/summary/monthly",
                web::get().to(summaries::driver_monthly_summary),
            )
            .route(
                "/payments/{user_id}/summary/weekly",
                web::get().to(summaries::driver_weekly_summary),
            )
            .route(
                "/maintenance/sweep",
                web::post().to(maintenance::sweep_expired),
            ),
    );
}
