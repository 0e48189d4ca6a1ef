//! Payload → QR symbol → PNG → data URI.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::error::QrError;
use crate::metrics::{GenerationStatus, QrMetrics};
use crate::payload::TransactionDescriptor;

pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

const CODE_PREFIX: &str = "QR-";
const MIN_CODE_LEN: usize = 5;
const MAX_CODE_LEN: usize = 255;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Raster settings for rendered symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Pixels per module, must be at least 1.
    pub module_size: u32,
    /// Quiet zone width, in modules.
    pub border: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            module_size: 10,
            border: 2,
        }
    }
}

/// A rendered QR code as a `data:image/png;base64,...` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage(String);

impl QrImage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decode the data URI back into raw PNG bytes.
    pub fn png_bytes(&self) -> Result<Vec<u8>, QrError> {
        let encoded = self
            .0
            .strip_prefix(DATA_URI_PREFIX)
            .ok_or_else(|| QrError::DataUri("missing png data uri prefix".to_string()))?;
        Ok(STANDARD.decode(encoded)?)
    }
}

/// Narrow format check applied before issuing a code.
///
/// Only the `QR-` prefix and a length of 5..=255 characters are enforced. The
/// character set is deliberately left to [`crate::QrValidator::validate`].
pub fn validate_qr_format(code: &str) -> bool {
    if !code.starts_with(CODE_PREFIX) {
        tracing::warn!(code = %code, "invalid QR code format");
        return false;
    }

    let len = code.chars().count();
    if !(MIN_CODE_LEN..=MAX_CODE_LEN).contains(&len) {
        tracing::warn!(code = %code, len, "invalid QR code length");
        return false;
    }

    true
}

/// Builds QR images for transactions.
pub struct QrEncoder {
    settings: RenderSettings,
    metrics: Arc<QrMetrics>,
}

impl QrEncoder {
    pub fn new(settings: RenderSettings, metrics: Arc<QrMetrics>) -> Self {
        Self { settings, metrics }
    }

    /// Encode `CODE:{code}|BAR:{bar_id}|AMOUNT:{amount}` into a PNG data URI.
    ///
    /// Uses the smallest symbol version that fits at error correction level L.
    /// The outcome and elapsed time are recorded before returning, on both paths.
    pub fn generate(&self, code: &str, bar_id: u64, amount: &str) -> Result<QrImage, QrError> {
        let start = Instant::now();
        let tx = TransactionDescriptor::new(code, bar_id, amount);

        tracing::info!(code = %code, bar_id, "generating QR code");

        let result = self.render(&tx.payload());
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => {
                self.metrics
                    .record_generation(GenerationStatus::Success, elapsed);
                tracing::info!(
                    code = %code,
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    "QR code generated"
                );
            }
            Err(e) => {
                self.metrics.record_generation(GenerationStatus::Error, elapsed);
                tracing::error!(code = %code, error = %e, "QR code generation failed");
            }
        }

        result
    }

    fn render(&self, payload: &str) -> Result<QrImage, QrError> {
        let RenderSettings {
            module_size,
            border,
        } = self.settings;
        if module_size == 0 {
            return Err(QrError::InvalidSetting(
                "module size must be at least 1".to_string(),
            ));
        }

        let symbol = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)?;
        let width = u32::try_from(symbol.width())
            .map_err(|_| QrError::Dimensions("symbol width".to_string()))?;
        let colors = symbol.to_colors();

        let side = border
            .checked_mul(2)
            .and_then(|quiet| quiet.checked_add(width))
            .and_then(|modules| modules.checked_mul(module_size))
            .ok_or_else(|| {
                QrError::Dimensions(format!(
                    "{width} modules with border {border} at {module_size}px"
                ))
            })?;

        let raster = GrayImage::from_fn(side, side, |x, y| {
            let (mx, my) = (x / module_size, y / module_size);
            if mx < border || my < border {
                return LIGHT;
            }
            let (cx, cy) = (mx - border, my - border);
            if cx >= width || cy >= width {
                return LIGHT;
            }
            match colors[(cy * width + cx) as usize] {
                Color::Dark => DARK,
                Color::Light => LIGHT,
            }
        });

        let mut png = Vec::new();
        raster.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(QrImage(format!("{DATA_URI_PREFIX}{}", STANDARD.encode(&png))))
    }
}
