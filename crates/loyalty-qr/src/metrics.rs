use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

const DURATION_BUCKETS: [f64; 9] = [0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0];

/// Label for `qr_codes_generated_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    Success,
    Error,
}

impl GenerationStatus {
    pub const ALL: [GenerationStatus; 2] = [GenerationStatus::Success, GenerationStatus::Error];

    pub fn as_str(self) -> &'static str {
        match self {
            GenerationStatus::Success => "success",
            GenerationStatus::Error => "error",
        }
    }
}

/// Label for `qr_validations_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    InvalidFormat,
    InvalidCharacters,
    Error,
}

impl ValidationResult {
    pub const ALL: [ValidationResult; 4] = [
        ValidationResult::Valid,
        ValidationResult::InvalidFormat,
        ValidationResult::InvalidCharacters,
        ValidationResult::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValidationResult::Valid => "valid",
            ValidationResult::InvalidFormat => "invalid_format",
            ValidationResult::InvalidCharacters => "invalid_characters",
            ValidationResult::Error => "error",
        }
    }
}

/// Counters and latency histograms for encode/validate operations.
///
/// Built once per process against a caller-owned [`Registry`] and shared as
/// `Arc<QrMetrics>`. All collectors are atomic, so concurrent requests can
/// record without coordination.
#[derive(Clone)]
pub struct QrMetrics {
    generated: IntCounterVec,
    generation_duration: Histogram,
    validations: IntCounterVec,
    validation_duration: Histogram,
}

impl QrMetrics {
    /// Create the collectors and register them with `registry`.
    ///
    /// Every label series is initialized at zero so a scrape shows the full
    /// label set before the first request.
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let generated = IntCounterVec::new(
            Opts::new(
                "qr_codes_generated_total",
                "Total number of QR codes generated",
            ),
            &["status"],
        )?;
        let generation_duration = Histogram::with_opts(
            HistogramOpts::new(
                "qr_generation_duration_seconds",
                "Time spent generating QR codes",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
        )?;
        let validations = IntCounterVec::new(
            Opts::new(
                "qr_validations_total",
                "Total number of QR code validations",
            ),
            &["result"],
        )?;
        let validation_duration = Histogram::with_opts(
            HistogramOpts::new(
                "qr_validation_duration_seconds",
                "Time spent validating QR codes",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
        )?;

        registry.register(Box::new(generated.clone()))?;
        registry.register(Box::new(generation_duration.clone()))?;
        registry.register(Box::new(validations.clone()))?;
        registry.register(Box::new(validation_duration.clone()))?;

        for status in GenerationStatus::ALL {
            generated.with_label_values(&[status.as_str()]);
        }
        for result in ValidationResult::ALL {
            validations.with_label_values(&[result.as_str()]);
        }

        Ok(Self {
            generated,
            generation_duration,
            validations,
            validation_duration,
        })
    }

    pub fn record_generation(&self, status: GenerationStatus, elapsed: Duration) {
        self.generated.with_label_values(&[status.as_str()]).inc();
        self.generation_duration.observe(elapsed.as_secs_f64());
    }

    pub fn record_validation(&self, result: ValidationResult, elapsed: Duration) {
        self.validations.with_label_values(&[result.as_str()]).inc();
        self.validation_duration.observe(elapsed.as_secs_f64());
    }

    pub fn generated(&self, status: GenerationStatus) -> u64 {
        self.generated.with_label_values(&[status.as_str()]).get()
    }

    pub fn validations(&self, result: ValidationResult) -> u64 {
        self.validations.with_label_values(&[result.as_str()]).get()
    }

    pub fn generation_samples(&self) -> u64 {
        self.generation_duration.get_sample_count()
    }

    pub fn validation_samples(&self) -> u64 {
        self.validation_duration.get_sample_count()
    }
}

/// Render everything in `registry` in the Prometheus text exposition format.
pub fn metrics_output(registry: &Registry) -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_are_exposed() {
        let registry = Registry::new();
        let _metrics = QrMetrics::register(&registry).unwrap();

        let text = metrics_output(&registry);
        assert!(text.contains("qr_codes_generated_total{status=\"success\"} 0"));
        assert!(text.contains("qr_codes_generated_total{status=\"error\"} 0"));
        assert!(text.contains("qr_validations_total{result=\"invalid_characters\"} 0"));
        assert!(text.contains("qr_validations_total{result=\"error\"} 0"));
        assert!(text.contains("qr_generation_duration_seconds_bucket"));
    }

    #[test]
    fn record_generation_bumps_counter_and_histogram() {
        let registry = Registry::new();
        let metrics = QrMetrics::register(&registry).unwrap();

        metrics.record_generation(GenerationStatus::Success, Duration::from_millis(3));
        metrics.record_generation(GenerationStatus::Error, Duration::from_millis(1));
        metrics.record_generation(GenerationStatus::Success, Duration::from_millis(2));

        assert_eq!(metrics.generated(GenerationStatus::Success), 2);
        assert_eq!(metrics.generated(GenerationStatus::Error), 1);
        assert_eq!(metrics.generation_samples(), 3);
    }

    #[test]
    fn record_validation_tracks_each_result() {
        let registry = Registry::new();
        let metrics = QrMetrics::register(&registry).unwrap();

        metrics.record_validation(ValidationResult::Valid, Duration::ZERO);
        metrics.record_validation(ValidationResult::InvalidFormat, Duration::ZERO);
        metrics.record_validation(ValidationResult::InvalidFormat, Duration::ZERO);

        assert_eq!(metrics.validations(ValidationResult::Valid), 1);
        assert_eq!(metrics.validations(ValidationResult::InvalidFormat), 2);
        assert_eq!(metrics.validations(ValidationResult::InvalidCharacters), 0);
        assert_eq!(metrics.validation_samples(), 3);
    }

    #[test]
    fn registering_twice_on_one_registry_fails() {
        let registry = Registry::new();
        let _first = QrMetrics::register(&registry).unwrap();
        assert!(QrMetrics::register(&registry).is_err());
    }
}
