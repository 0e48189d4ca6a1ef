//! QR code lifecycle for the loyalty bars system.
//!
//! A bar issues a QR code for a transaction; a client later presents that code
//! for validation. This crate holds the decision logic for both halves and the
//! best-effort notification of the loyalty gateway once a code checks out.
//!
//! # Flow
//!
//! - **Generate**: [`validate_qr_format`] → [`QrEncoder::generate`] → data-URI PNG
//! - **Validate**: [`QrValidator::check_security`] → [`QrValidator::validate`] →
//!   [`GatewayNotifier::notify_transaction`] on a valid verdict
//!
//! [`QrService`] sequences those steps for the HTTP layer. Every component
//! records into a shared [`QrMetrics`] handed in at construction.
//!
//! # Quick example
//!
//! ```no_run
//! use std::sync::Arc;
//! use loyalty_qr::{QrEncoder, QrMetrics, RenderSettings};
//!
//! let registry = prometheus::Registry::new();
//! let metrics = Arc::new(QrMetrics::register(&registry).unwrap());
//! let encoder = QrEncoder::new(RenderSettings::default(), metrics);
//!
//! let image = encoder.generate("QR-ABC12345", 1, "50.00").unwrap();
//! assert!(image.as_str().starts_with("data:image/png;base64,"));
//! ```

pub mod encoder;
pub mod error;
pub mod metrics;
pub mod notifier;
pub mod payload;
pub mod service;
pub mod validator;

pub use encoder::{validate_qr_format, QrEncoder, QrImage, RenderSettings, DATA_URI_PREFIX};
pub use error::{GenerateError, NotifyError, QrError};
pub use metrics::{GenerationStatus, QrMetrics, ValidationResult};
pub use notifier::{gateway_client, GatewayNotifier};
pub use payload::TransactionDescriptor;
pub use service::QrService;
pub use validator::{QrValidator, Rejection, Verdict};
