//! Error types for replay operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Errors that can occur while replaying a log.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Reading or writing a record failed.
    #[error("codec error: {0}")]
    Codec(#[from] evreplay_codec::CodecError),

    /// The input log could not be opened.
    #[error("cannot open input {}: {source}", path.display())]
    OpenInput {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The output device could not be opened.
    #[error("cannot open device {}: {source}", path.display())]
    OpenOutput {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The replay configuration is unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },
}

impl ReplayError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
