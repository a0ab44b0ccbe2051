//! # evreplay Core
//!
//! Replays a recorded input-event log into a device node, reproducing the
//! original spacing between events.
//!
//! This crate provides:
//! - [`Replayer`], the single-threaded read/schedule/sleep/emit loop
//! - [`Clock`], with a real-time [`SystemClock`] and a test [`ManualClock`]
//! - [`ReplayConfig`] and [`replay_files`] for file-to-device runs
//! - [`ReplayStats`] describing how closely a run kept to schedule
//!
//! Emitted records carry their replay-time timestamps, so the output of one
//! run is itself a valid log for the next.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod config;
mod error;
mod replayer;
mod stats;

pub use clock::{sleep_until, Clock, ManualClock, SystemClock};
pub use config::ReplayConfig;
pub use error::{ReplayError, ReplayResult};
pub use replayer::{replay_files, replay_files_with_clock, Anchors, ReplayState, Replayer};
pub use stats::ReplayStats;
