use std::sync::Arc;

use crate::encoder::{validate_qr_format, QrEncoder, QrImage, RenderSettings};
use crate::error::GenerateError;
use crate::metrics::QrMetrics;
use crate::notifier::GatewayNotifier;
use crate::validator::{QrValidator, Verdict};

/// Generate and validate flows as seen by the HTTP layer.
///
/// Holds no per-request state; one instance is shared by every worker.
pub struct QrService {
    encoder: QrEncoder,
    validator: QrValidator,
    notifier: GatewayNotifier,
}

impl QrService {
    pub fn new(settings: RenderSettings, metrics: Arc<QrMetrics>, notifier: GatewayNotifier) -> Self {
        Self {
            encoder: QrEncoder::new(settings, metrics.clone()),
            validator: QrValidator::new(metrics),
            notifier,
        }
    }

    /// Narrow format check, then render.
    pub fn generate(&self, code: &str, bar_id: u64, amount: &str) -> Result<QrImage, GenerateError> {
        if !validate_qr_format(code) {
            return Err(GenerateError::InvalidFormat);
        }
        Ok(self.encoder.generate(code, bar_id, amount)?)
    }

    /// Security screen, format rules, then a best-effort gateway notification
    /// for valid codes.
    ///
    /// The notification outcome never changes the verdict.
    pub async fn validate(&self, code: &str) -> Verdict {
        if !self.validator.check_security(code) {
            return Verdict::security_failure();
        }

        let verdict = self.validator.validate(code);
        if verdict.valid {
            let data = serde_json::json!({ "status": "validated" });
            // Failures are already logged by the notifier.
            let _ = self.notifier.notify_transaction(code, &data).await;
        }
        verdict
    }

    /// Whether the gateway currently reports itself healthy.
    pub async fn gateway_reachable(&self) -> bool {
        self.notifier.check_health().await.is_ok()
    }
}
