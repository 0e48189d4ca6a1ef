use thiserror::Error;

/// Errors raised while turning a payload into a QR image.
#[derive(Debug, Error)]
pub enum QrError {
    #[error("qr encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("image rendering failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("image dimensions overflow: {0}")]
    Dimensions(String),

    #[error("invalid render setting: {0}")]
    InvalidSetting(String),

    #[error("malformed data uri: {0}")]
    DataUri(String),

    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Outcome of the generate flow when no image is produced.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The code failed the narrow issuance format check.
    #[error("invalid QR code format")]
    InvalidFormat,

    #[error(transparent)]
    Encoding(#[from] QrError),
}

/// Errors from talking to the loyalty gateway.
///
/// These never reach the validate caller; they are logged and downgraded.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("gateway request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("gateway returned status {0}")]
    Status(u16),

    #[error("gateway response parse failed: {0}")]
    Body(#[source] reqwest::Error),

    #[error("gateway reported status {0:?}")]
    Unhealthy(String),
}
