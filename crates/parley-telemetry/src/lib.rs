//! Logging setup for Parley
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a text or
//! JSON formatting layer. Logs go to stderr so command output on stdout stays
//! clean.

use parley_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::EnvFilter;

/// Filter used when the configured directive does not parse
const FALLBACK_FILTER: &str = "info";

/// Initialize logging from configuration
///
/// `filter_override` (typically from the command line) wins over `RUST_LOG`,
/// which wins over `telemetry.log_filter`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig, filter_override: Option<&str>) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = build_filter(config, filter_override);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(false),
            )
            .try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Resolve the effective filter directive
fn build_filter(config: &TelemetryConfig, filter_override: Option<&str>) -> EnvFilter {
    let directive = filter_override
        .map(str::to_owned)
        .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| config.log_filter.clone());

    EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter `{directive}` ({e}), falling back to `{FALLBACK_FILTER}`");
        EnvFilter::new(FALLBACK_FILTER)
    })
}
