//! Tracing subscriber setup
//!
//! Events go to stderr so stdout stays parseable in JSON mode.

use crate::config::Verbosity;
use tracing_subscriber::EnvFilter;

/// Filter for `verbosity`, unless `RUST_LOG` is set
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()))
}

/// Installs the global subscriber
///
/// Returns `false` when a subscriber was already installed.
pub fn init_tracing(verbosity: Verbosity) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(verbosity == Verbosity::Debug)
        .try_init()
        .is_ok()
}
