//! Replay configuration.

use crate::error::{ReplayError, ReplayResult};
use std::path::{Path, PathBuf};

/// Configuration for a replay run.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Recorded event log to read.
    pub input: PathBuf,

    /// Device node (or any writable file) receiving the events.
    pub device: PathBuf,

    /// Whether to truncate the output when it is a regular file.
    pub truncate_output: bool,
}

impl ReplayConfig {
    /// Creates a configuration replaying `input` into `device`.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, device: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            device: device.into(),
            truncate_output: true,
        }
    }

    /// Sets the input log path.
    #[must_use]
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = path.into();
        self
    }

    /// Sets the output device path.
    #[must_use]
    pub fn device(mut self, path: impl Into<PathBuf>) -> Self {
        self.device = path.into();
        self
    }

    /// Sets whether a regular output file is truncated on open.
    #[must_use]
    pub const fn truncate_output(mut self, value: bool) -> Self {
        self.truncate_output = value;
        self
    }

    /// Checks that both paths are present.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidConfig`] if either path is empty.
    pub fn validate(&self) -> ReplayResult<()> {
        if is_empty(&self.input) {
            return Err(ReplayError::invalid_config("input path is empty"));
        }
        if is_empty(&self.device) {
            return Err(ReplayError::invalid_config("device path is empty"));
        }
        Ok(())
    }
}

fn is_empty(path: &Path) -> bool {
    path.as_os_str().is_empty()
}
