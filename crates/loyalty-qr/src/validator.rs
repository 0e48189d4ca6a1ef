//! Security and format rules for codes presented at redemption time.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::metrics::{QrMetrics, ValidationResult};

const CODE_PREFIX: &str = "QR-";
const MIN_CODE_LEN: usize = 5;

/// Matched case-insensitively against the uppercased code.
const DANGEROUS_PATTERNS: [&str; 8] = ["'", "\"", ";", "--", "/*", "*/", "DROP", "DELETE"];

const VALID_MESSAGE: &str = "QR code is valid";
const INVALID_MESSAGE: &str = "Invalid QR code";
const SECURITY_MESSAGE: &str = "QR code failed security check";
const SECURITY_REASON: &str = "Potentially malicious code detected";

/// Why a code failed the format rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    MissingPrefix,
    InvalidCharacters,
}

impl Rejection {
    pub fn reason(self) -> &'static str {
        match self {
            Rejection::TooShort => "Code is too short",
            Rejection::MissingPrefix => "Code must start with 'QR-'",
            Rejection::InvalidCharacters => "Code contains invalid characters",
        }
    }

    fn metric(self) -> ValidationResult {
        match self {
            Rejection::TooShort | Rejection::MissingPrefix => ValidationResult::InvalidFormat,
            Rejection::InvalidCharacters => ValidationResult::InvalidCharacters,
        }
    }
}

/// Result of validating one code. Serializes as `{valid, message, reason}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub valid: bool,
    pub message: String,
    pub reason: Option<String>,
}

impl Verdict {
    pub fn accepted() -> Self {
        Self {
            valid: true,
            message: VALID_MESSAGE.to_string(),
            reason: None,
        }
    }

    pub fn rejected(rejection: Rejection) -> Self {
        Self {
            valid: false,
            message: INVALID_MESSAGE.to_string(),
            reason: Some(rejection.reason().to_string()),
        }
    }

    /// Verdict for a code stopped by [`QrValidator::check_security`].
    pub fn security_failure() -> Self {
        Self {
            valid: false,
            message: SECURITY_MESSAGE.to_string(),
            reason: Some(SECURITY_REASON.to_string()),
        }
    }
}

pub struct QrValidator {
    metrics: Arc<QrMetrics>,
}

impl QrValidator {
    pub fn new(metrics: Arc<QrMetrics>) -> Self {
        Self { metrics }
    }

    /// Denylist screen. Returns `false` if the uppercased code contains any
    /// of `'` `"` `;` `--` `/*` `*/` `DROP` `DELETE`.
    pub fn check_security(&self, code: &str) -> bool {
        let upper = code.to_uppercase();
        if DANGEROUS_PATTERNS.iter().any(|p| upper.contains(p)) {
            tracing::warn!(code = %code, "security check failed for QR code");
            return false;
        }
        true
    }

    /// Apply the format rules in order; the first failing rule wins.
    ///
    /// 1. shorter than 5 characters
    /// 2. missing the `QR-` prefix
    /// 3. any character outside `A-Z`, `0-9`, `-`
    pub fn validate(&self, code: &str) -> Verdict {
        let start = Instant::now();
        tracing::info!(code = %code, "validating QR code");

        let outcome = check_format(code);
        let elapsed = start.elapsed();

        match outcome {
            Ok(()) => {
                self.metrics
                    .record_validation(ValidationResult::Valid, elapsed);
                tracing::info!(
                    code = %code,
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    "QR code validated"
                );
                Verdict::accepted()
            }
            Err(rejection) => {
                self.metrics.record_validation(rejection.metric(), elapsed);
                tracing::info!(code = %code, reason = rejection.reason(), "QR code rejected");
                Verdict::rejected(rejection)
            }
        }
    }
}

fn check_format(code: &str) -> Result<(), Rejection> {
    if code.chars().count() < MIN_CODE_LEN {
        return Err(Rejection::TooShort);
    }
    if !code.starts_with(CODE_PREFIX) {
        return Err(Rejection::MissingPrefix);
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(Rejection::InvalidCharacters);
    }
    Ok(())
}
