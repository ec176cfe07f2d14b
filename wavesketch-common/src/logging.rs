//! Tracing subscriber initialization
//!
//! Logs go to stderr so that rendered output on stdout stays machine-readable.

use crate::{Error, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter directive used when `RUST_LOG` is not set
///
/// Example: `default_directive("wavesketch", "debug")` → `"wavesketch=debug"`
pub fn default_directive(target: &str, level: &str) -> String {
    format!("{}={}", target.replace('-', "_"), level)
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over `fallback_directive` when present and valid.
pub fn init_tracing(fallback_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_directive))
        .map_err(|e| {
            Error::Config(format!("Invalid log filter '{}': {}", fallback_directive, e))
        })?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {}", e)))
}
