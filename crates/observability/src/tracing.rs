//! Subscriber initialization, configurable via `RUST_LOG`.

use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// JSON logs with timestamps, for service-style deployments.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_json() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Compact human-readable logs, for local runs and test harnesses.
pub fn init_compact() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .compact()
        .with_target(false)
        .try_init();
}
