use actix_web::web;

pub mod admin;
pub mod payments;
pub mod profile;
pub mod shifts;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(profile::configure)
            .configure(payments::configure)
            .configure(shifts::configure)
            .configure(admin::configure),
    );
}
