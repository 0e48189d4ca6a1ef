use std::env;

use loyalty_qr::RenderSettings;
use url::Url;

const DEFAULT_APP_NAME: &str = "QR Service";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";
const DEFAULT_QR_SIZE: u32 = 10;
const DEFAULT_QR_BORDER: u32 = 2;
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

#[derive(Clone)]
pub struct ServiceConfig {
    /// Name reported by the probe and root endpoints
    pub app_name: String,
    /// Bind address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Loyalty gateway base URL (notifications and readiness probe)
    pub gateway_url: String,
    /// QR module size in pixels
    pub qr_size: u32,
    /// QR quiet zone width in modules
    pub qr_border: u32,
    /// Default log verbosity when RUST_LOG is not set
    pub log_level: String,
    /// Shared secret. Loaded for deployment parity; no rule consumes it.
    pub shared_secret: Option<String>,
    /// CORS allowed origins
    pub allowed_origins: Vec<String>,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("app_name", &self.app_name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("gateway_url", &self.gateway_url)
            .field("qr_size", &self.qr_size)
            .field("qr_border", &self.qr_border)
            .field("log_level", &self.log_level)
            .field(
                "shared_secret",
                &self.shared_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let app_name = get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_number(&get, "PORT", DEFAULT_PORT)?;

        let gateway_url = get("GATEWAY_URL").unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
        let parsed =
            Url::parse(&gateway_url).map_err(|_| ConfigError::InvalidUrl(gateway_url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(gateway_url));
        }

        let qr_size = parse_number(&get, "QR_SIZE", DEFAULT_QR_SIZE)?;
        if qr_size == 0 {
            return Err(ConfigError::OutOfRange {
                var: "QR_SIZE",
                reason: "must be at least 1",
            });
        }
        let qr_border = parse_number(&get, "QR_BORDER", DEFAULT_QR_BORDER)?;

        let log_level = get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let shared_secret = get("QR_SERVICE_SECRET");

        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec!["*".to_string()]);

        Ok(Self {
            app_name,
            host,
            port,
            gateway_url,
            qr_size,
            qr_border,
            log_level,
            shared_secret,
            allowed_origins,
        })
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            module_size: self.qr_size,
            border: self.qr_border,
        }
    }
}

fn parse_number<T, G>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid number in {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} {reason}")]
    OutOfRange {
        var: &'static str,
        reason: &'static str,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
