//! Export Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An export error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The database could not be reached, or refused the credentials.
    #[display("could not connect to database")]
    Connection,
    /// An export was requested before connecting (or after disconnecting).
    #[display("not connected to database")]
    NotConnected,
    /// A query failed.
    #[display("database error")]
    Database,
    #[display("invalid table prefix: {_0:?}")]
    InvalidTablePrefix(#[error(not(source))] String),
    #[display("could not create output directory: {}", _0.display())]
    OutputDirectory(#[error(not(source))] PathBuf),
    /// Writing a single exported page failed.
    #[display("could not write file: {}", _0.display())]
    Write(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// Nothing in the export pipeline is retried: a page either makes it to
    /// disk on the first attempt or is skipped.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
