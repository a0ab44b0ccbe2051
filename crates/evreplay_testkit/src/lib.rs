//! # evreplay Testkit
//!
//! Test utilities for evreplay.
//!
//! This crate provides:
//! - Temporary input/output log fixtures
//! - Canned recordings
//! - Property-based test generators using proptest
//! - Canonical record encodings for cross-language producers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use evreplay_testkit::prelude::*;
//!
//! #[test]
//! fn replays_a_tap() {
//!     let log = TempLog::with_records(&scenarios::key_tap(TimeVal::new(1, 0), 30, 80_000));
//!     // ... replay log.input_path() into log.output_path()
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
    pub use evreplay_codec::{EventRecord, TimeVal, RECORD_SIZE};
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
