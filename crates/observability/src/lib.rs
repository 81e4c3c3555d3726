//! Shared tracing/logging setup for freshmart binaries.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset. sqlx logs every statement at
/// info, which drowns the request log.
const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Initialize process-wide logging.
///
/// JSON lines with timestamps, filtered by `RUST_LOG`. Safe to call more
/// than once; later calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
