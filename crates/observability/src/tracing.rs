//! Tracing/logging initialization.
//!
//! One JSON line per event. Provider calls and job transitions log at `info`,
//! classified failures at `warn`; raise with `RUST_LOG=debug` to see request
//! payloads from the provider layer.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). Tests call this
/// too, so `try_init` failures are swallowed.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
