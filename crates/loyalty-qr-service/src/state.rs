use std::sync::Arc;

use loyalty_qr::{gateway_client, GatewayNotifier, QrMetrics, QrService};
use prometheus::Registry;

use crate::config::ServiceConfig;
use crate::error::StartupError;
use crate::metrics::HttpMetrics;

/// Shared application state
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub qr: QrService,
    pub registry: Registry,
    pub qr_metrics: Arc<QrMetrics>,
    pub http_metrics: HttpMetrics,
}

impl AppState {
    /// Build state with a fresh metrics registry.
    pub fn new(config: ServiceConfig) -> Result<Self, StartupError> {
        let registry = Registry::new();
        let qr_metrics = Arc::new(QrMetrics::register(&registry)?);
        let http_metrics = HttpMetrics::register(&registry)?;

        let notifier = GatewayNotifier::new(gateway_client()?, config.gateway_url.clone());
        let qr = QrService::new(config.render_settings(), qr_metrics.clone(), notifier);

        Ok(Self {
            config: Arc::new(config),
            qr,
            registry,
            qr_metrics,
            http_metrics,
        })
    }
}
