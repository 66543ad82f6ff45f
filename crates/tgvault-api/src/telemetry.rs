//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber. Honors `RUST_LOG`; defaults to
/// `info`. JSON output is for log collectors and is opt-in via config.
pub fn init_telemetry(json: bool) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))
}
