//! HTTP client for the loyalty gateway.
//!
//! Both calls are single-shot: no retries, no backoff. A failure is logged here
//! and handed back as a [`NotifyError`] for the caller to discard.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

const NOTIFICATION_PATH: &str = "/api/qr/notification";
const HEALTH_PATH: &str = "/actuator/health";

pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct TransactionNotification<'a> {
    qr_code: &'a str,
    transaction_data: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GatewayHealth {
    status: Option<String>,
}

#[derive(Clone)]
pub struct GatewayNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayNotifier {
    /// `client` should be shared process-wide; see [`gateway_client`].
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `{qr_code, transaction_data}` to the gateway's notification endpoint.
    ///
    /// Succeeds only on a 2xx response within [`NOTIFY_TIMEOUT`].
    pub async fn notify_transaction(
        &self,
        code: &str,
        data: &serde_json::Value,
    ) -> Result<(), NotifyError> {
        let url = format!("{}{NOTIFICATION_PATH}", self.base_url);
        let body = TransactionNotification {
            qr_code: code,
            transaction_data: data,
        };

        tracing::info!(code = %code, "notifying gateway about QR code");

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .timeout(NOTIFY_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(code = %code, error = %e, "failed to notify gateway");
                NotifyError::Transport(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::error!(code = %code, status = %status, "gateway rejected notification");
            return Err(NotifyError::Status(status.as_u16()));
        }

        tracing::info!(code = %code, "gateway notified");
        Ok(())
    }

    /// GET the gateway health endpoint; healthy only when it reports `"UP"`.
    pub async fn check_health(&self) -> Result<(), NotifyError> {
        let url = format!("{}{HEALTH_PATH}", self.base_url);

        let result = self.probe(&url).await;
        if let Err(ref e) = result {
            tracing::warn!(url = %url, error = %e, "gateway health check failed");
        }
        result
    }

    async fn probe(&self, url: &str) -> Result<(), NotifyError> {
        let resp = self
            .client
            .get(url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(NotifyError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        let health: GatewayHealth = resp.json().await.map_err(NotifyError::Body)?;
        match health.status.as_deref() {
            Some("UP") => Ok(()),
            other => Err(NotifyError::Unhealthy(other.unwrap_or("").to_string())),
        }
    }
}

/// Shared HTTP client for gateway calls. Redirects are not followed.
pub fn gateway_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
}
