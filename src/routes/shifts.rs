use actix_web::web;

use crate::handlers::shifts;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/shifts")
            .route("/requests", web::put().to(shifts::submit_request))
            .route("/requests", web::get().to(shifts::get_request))
            .route("/confirmed", web::get().to(shifts::published_week))
            .route("/confirmed/me", web::get().to(shifts::my_confirmation)),
    );
}
