use actix_web::web;

use crate::handlers::{payments, summaries};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payments")
            .route("", web::put().to(payments::submit_payment))
            .route("/today", web::get().to(payments::get_payment_for_day))
            .route(
                "/summary/monthly",
                web::get().to(summaries::my_monthly_summary),
            )
            .route(
                "/summary/weekly",
                web::get().to(summaries::my_weekly_summary),
            ),
    );
}
