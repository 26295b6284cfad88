//! Tracing subscriber setup.
//!
//! Logs go to stderr; stdout carries command output and the MCP transport.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count when `RUST_LOG` is unset.
#[must_use]
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "orbdeck=info,warn",
        _ => "orbdeck=debug,info",
    }
}

/// Install the global subscriber. Safe to call once per process.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
