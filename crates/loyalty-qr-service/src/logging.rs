use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Translate a `LOG_LEVEL` value into an `EnvFilter` directive.
///
/// Accepts tracing level names and the classic `WARNING`/`CRITICAL` spellings;
/// anything unrecognized falls back to `info`.
pub fn filter_directive(log_level: &str) -> String {
    let level = match log_level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" | "critical" | "fatal" => "error",
        _ => "info",
    };
    format!("{level},actix_web=info")
}

/// Subscriber writing one JSON object per event to `writer`.
///
/// `RUST_LOG` takes precedence over `log_level`.
pub fn json_subscriber<W>(
    log_level: &str,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
}

/// Install the global JSON subscriber on stdout.
pub fn init_tracing(log_level: &str) {
    json_subscriber(log_level, std::io::stdout).init();
}
