//! Conversion Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A conversion error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// Markup itself never fails to convert; only the filesystem can.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not list input directory: {}", _0.display())]
    InputDirectory(#[error(not(source))] PathBuf),
    #[display("could not create output directory: {}", _0.display())]
    OutputDirectory(#[error(not(source))] PathBuf),
    /// The source file is unreadable, or not valid UTF-8.
    #[display("could not read file: {}", _0.display())]
    Read(#[error(not(source))] PathBuf),
    #[display("could not write file: {}", _0.display())]
    Write(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// A file that fails to convert is counted and skipped, never retried.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
