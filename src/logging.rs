//! Logging setup for the chatpulse binaries.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the program. The CLI logs to stderr so stdout stays reserved for the
//! rendered summary.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity flag.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "chatpulse=debug" } else { "warn" }
}

/// Initialize the logging system.
///
/// Sets up tracing with:
/// - Output to stderr, without event targets
/// - Level from `RUST_LOG` if set, otherwise from the `verbose` flag
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Initialize logging for tests (logs to the test writer)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
