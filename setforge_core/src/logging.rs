//! Tracing setup shared by the Setforge binaries.
//!
//! Diagnostics always go to stderr: stdout is reserved for command
//! output such as generated workout JSON and catalog listings, and must
//! stay machine-parseable.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging at the default `info` level.
///
/// `RUST_LOG` overrides the filter as usual.
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with an explicit default level, still overridable
/// through `RUST_LOG`.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Logging for tests, captured by the test harness.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
