//! Configuration Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// One of the configuration sources could not be read or parsed.
    #[display("could not load configuration")]
    Load,
    /// Configuration was loaded, but a value is unusable. Fix the named setting.
    #[display("invalid configuration: {_0}")]
    Invalid(#[error(not(source))] String),
    /// A database URL could not be assembled from the configured parts.
    #[display("could not build database URL")]
    Url,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// Configuration is read once per run and never re-read on failure.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
