//! Error types for wavesketch
//!
//! One variant per failure kind. Every kind maps to a stable numeric code
//! (see [`Error::code`]) which the CLI uses as its exit status.

use thiserror::Error;

/// Main error type for the decoder and renderer
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument (empty path, missing file, resolution out of range)
    #[error("Invalid parameter: {0}")]
    Param(String),

    /// Source or sink could not be opened, or nothing has been loaded yet
    #[error("Access error: {0}")]
    Access(String),

    /// Read, seek or position query failed, including short reads
    #[error("Read error: {0}")]
    Read(String),

    /// Output write failed
    #[error("Write error: {0}")]
    Write(String),

    /// Releasing a source or sink failed
    #[error("Close error: {0}")]
    Close(String),

    /// Magic tag mismatch or unsupported audio format code
    #[error("Incompatible format: {0}")]
    IncompatibleFormat(String),

    /// Derived header fields disagree, or a chunk size is invalid
    #[error("File header contains invalid data: {field} (expected {expected}, found {actual})")]
    HeaderInconsistency {
        field: &'static str,
        expected: String,
        actual: String,
    },

    /// Sample value range computed from the bit depth is unusable
    #[error("Invalid range value: {0}")]
    InvalidRange(String),
}

impl Error {
    /// Numeric error code
    ///
    /// | Code | Kind |
    /// |------|------|
    /// | 1 | Param |
    /// | 2 | Access |
    /// | 3 | Read, InvalidRange |
    /// | 4 | Write |
    /// | 5 | Close |
    /// | 6 | IncompatibleFormat |
    /// | 7 | HeaderInconsistency |
    pub fn code(&self) -> i32 {
        match self {
            Error::Param(_) => 1,
            Error::Access(_) => 2,
            Error::Read(_) | Error::InvalidRange(_) => 3,
            Error::Write(_) => 4,
            Error::Close(_) => 5,
            Error::IncompatibleFormat(_) => 6,
            Error::HeaderInconsistency { .. } => 7,
        }
    }

    pub(crate) fn inconsistent(
        field: &'static str,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Error::HeaderInconsistency {
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Convenience Result type using wavesketch Error
pub type Result<T> = std::result::Result<T, Error>;
