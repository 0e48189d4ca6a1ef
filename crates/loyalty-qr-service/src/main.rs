use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};

use qr_service::config::{ServiceConfig, DEFAULT_LOG_LEVEL};
use qr_service::{cors, logging, middleware, routes, state::AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = ServiceConfig::from_env();
    let log_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    logging::init_tracing(&log_level);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let host = config.host.clone();
    let port = config.port;
    let allowed_origins = config.allowed_origins.clone();

    tracing::info!(
        "Starting {} v{} on {}:{}",
        config.app_name,
        env!("CARGO_PKG_VERSION"),
        host,
        port
    );
    tracing::info!("Gateway URL: {}", config.gateway_url);
    tracing::debug!(?config, "loaded configuration");

    let state = match AppState::new(config) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            tracing::error!("Failed to initialize service state: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("  POST http://{host}:{port}/api/qr/generate");
    tracing::info!("  POST http://{host}:{port}/api/qr/validate");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(routes::qr::json_config())
            .wrap(from_fn(middleware::track_requests))
            .wrap(Logger::default())
            .wrap(cors::build_cors(&allowed_origins))
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run();

    let result = server.await;
    tracing::info!("Shutting down QR service");
    result
}
