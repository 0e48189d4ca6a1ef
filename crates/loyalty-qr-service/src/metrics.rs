use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::time::Duration;

/// Per-request HTTP metrics, recorded by [`crate::middleware::track_requests`].
#[derive(Clone)]
pub struct HttpMetrics {
    requests: IntCounterVec,
    duration: HistogramVec,
}

impl HttpMetrics {
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests"),
            &["method", "endpoint", "status"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request duration")
                .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["method", "endpoint"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self { requests, duration })
    }

    pub fn observe(&self, method: &str, endpoint: &str, status: u16, elapsed: Duration) {
        self.requests
            .with_label_values(&[method, endpoint, &status.to_string()])
            .inc();
        self.duration
            .with_label_values(&[method, endpoint])
            .observe(elapsed.as_secs_f64());
    }

    pub fn requests(&self, method: &str, endpoint: &str, status: u16) -> u64 {
        self.requests
            .with_label_values(&[method, endpoint, &status.to_string()])
            .get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_counts_by_labels() {
        let metrics = HttpMetrics::register(&Registry::new()).unwrap();
        metrics.observe("POST", "/api/qr/validate", 200, Duration::from_millis(4));
        metrics.observe("POST", "/api/qr/validate", 200, Duration::from_millis(2));
        metrics.observe("POST", "/api/qr/generate", 400, Duration::from_millis(1));

        assert_eq!(metrics.requests("POST", "/api/qr/validate", 200), 2);
        assert_eq!(metrics.requests("POST", "/api/qr/generate", 400), 1);
        assert_eq!(metrics.requests("GET", "/health", 200), 0);
    }
}
