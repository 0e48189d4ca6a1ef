//! HTTP boundary for the loyalty QR service.
//!
//! Parses requests, runs them through [`loyalty_qr::QrService`], and maps the
//! outcome to responses. Also exposes probes and Prometheus metrics.
//!
//! # Modules
//!
//! - [`routes`]: generate/validate endpoints, health probes, `/metrics`
//! - [`state`]: shared [`AppState`](state::AppState)
//! - [`config`]: environment configuration
//! - [`middleware`]: per-request HTTP metrics

pub mod config;
pub mod cors;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use state::AppState;
