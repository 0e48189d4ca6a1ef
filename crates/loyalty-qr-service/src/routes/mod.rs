pub mod health;
pub mod qr;

use actix_web::web;

/// Mount every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::root)
        .service(health::health)
        .service(health::ready)
        .service(health::live)
        .service(health::metrics_endpoint)
        .service(qr::generate)
        .service(qr::validate);
}
