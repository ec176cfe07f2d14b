//! Common error types for wavesketch

use thiserror::Error;

/// Common result type for wavesketch support operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while bootstrapping the tooling (config, logging)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
