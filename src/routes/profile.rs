use actix_web::web;

use crate::handlers::profile;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(profile::me));
}
