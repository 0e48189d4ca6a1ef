use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use loyalty_qr::{GenerateError, QrError};
use std::fmt;

#[derive(Debug)]
pub enum ServiceError {
    /// Request body missing fields or out of bounds
    InvalidRequest(String),
    /// Code failed the issuance format check
    InvalidFormat,
    /// Encoder could not produce an image
    Generation(QrError),
    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
            ServiceError::InvalidFormat => write!(f, "invalid QR code format"),
            ServiceError::Generation(e) => write!(f, "generation failed: {}", e),
            ServiceError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<GenerateError> for ServiceError {
    fn from(e: GenerateError) -> Self {
        match e {
            GenerateError::InvalidFormat => ServiceError::InvalidFormat,
            GenerateError::Encoding(e) => ServiceError::Generation(e),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::InvalidFormat => StatusCode::BAD_REQUEST,
            ServiceError::Generation(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::InvalidRequest(msg) => {
                HttpResponse::UnprocessableEntity().json(serde_json::json!({
                    "error": "invalid_request",
                    "message": msg
                }))
            }
            ServiceError::InvalidFormat => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "invalid_format",
                "message": "Invalid QR code format. Must start with 'QR-'"
            })),
            ServiceError::Generation(e) => {
                tracing::error!("QR generation error: {}", e);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "generation_failed",
                    "message": "Failed to generate QR code"
                }))
            }
            ServiceError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }))
            }
        }
    }
}

/// Failures while assembling shared state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("metrics registration failed: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("http client construction failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}
