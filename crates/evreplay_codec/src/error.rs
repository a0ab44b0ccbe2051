//! Error types for the codec crate.

use std::io;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while reading or writing event records.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A buffer held fewer bytes than one record.
    #[error("truncated record: expected {expected} bytes, got {actual}")]
    TruncatedRecord {
        /// Bytes required for a complete record.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },
}

impl CodecError {
    /// Create a truncated record error.
    pub fn truncated(expected: usize, actual: usize) -> Self {
        Self::TruncatedRecord { expected, actual }
    }
}
