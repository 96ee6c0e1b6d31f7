//! Structured logging setup for Leto binaries.

use tracing_subscriber::EnvFilter;

/// Crate targets that receive the configured log level.
const CRATE_TARGETS: &[&str] = &["leto", "letodev", "letoshell"];

/// Installs a `tracing` subscriber.
///
/// `level` (e.g. "info", "debug") applies to the Leto crates only. The
/// `RUST_LOG` environment variable overrides it when set.
pub fn init(level: &str) {
    let default_filter = CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
