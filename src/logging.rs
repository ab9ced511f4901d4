//! Logging setup.
//!
//! The core only emits `tracing` events; hosts decide whether to install a
//! subscriber. These helpers install the usual `fmt` subscriber.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// The filter is read from `RUST_LOG` (default: `info`), e.g.
/// `RUST_LOG=u_recovery=debug` to see every rule decision.
///
/// # Example
/// ```no_run
/// u_recovery::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Installs a debug-level subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
