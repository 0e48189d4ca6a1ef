use actix_web::{get, web, HttpResponse};

use crate::state::AppState;

#[get("/")]
pub async fn root(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": &state.config.app_name,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "health": "/health",
    }))
}

#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": &state.config.app_name,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness probe. Reports gateway reachability but stays 200 when the
/// gateway is down; the service can still issue and validate codes.
#[get("/health/ready")]
pub async fn ready(state: web::Data<AppState>) -> HttpResponse {
    let gateway_reachable = state.qr.gateway_reachable().await;

    HttpResponse::Ok().json(serde_json::json!({
        "status": "ready",
        "service": &state.config.app_name,
        "gateway_reachable": gateway_reachable,
    }))
}

#[get("/health/live")]
pub async fn live(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "service": &state.config.app_name,
    }))
}

#[get("/metrics")]
pub async fn metrics_endpoint(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(loyalty_qr::metrics::metrics_output(&state.registry))
}
