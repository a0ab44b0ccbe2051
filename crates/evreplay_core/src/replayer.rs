//! The replay loop.
//!
//! Each record is handled in four steps:
//!
//! 1. Read the next complete record
//! 2. Compute its target time: replay epoch + (record time - first record time)
//! 3. Sleep until the target time, unless it has already passed
//! 4. Write the record stamped with the target time, then flush
//!
//! The replay epoch and the first record time are both captured when the
//! first record arrives and never change afterwards.

use crate::clock::{sleep_until, Clock, SystemClock};
use crate::config::ReplayConfig;
use crate::error::{ReplayError, ReplayResult};
use crate::stats::ReplayStats;
use evreplay_codec::{EventRecord, RecordReader, RecordWriter, TimeVal};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Write};
use tracing::{debug, info, trace};

/// The two reference points every target time is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
    /// Wall-clock time at which the first record was read.
    pub replay_start: TimeVal,
    /// Timestamp embedded in the first record.
    pub record_start: TimeVal,
}

impl Anchors {
    /// Target emission time for a record.
    #[must_use]
    pub fn target(&self, record_time: TimeVal) -> TimeVal {
        self.replay_start + (record_time - self.record_start)
    }
}

/// Lifecycle of a [`Replayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    /// No record has been processed yet.
    AwaitingFirstRecord,
    /// The first record fixed the anchors; later records are scheduled
    /// against them.
    Streaming(Anchors),
    /// The input ended. Terminal.
    Done,
}

/// Replays a record stream against a clock.
///
/// # Example
///
/// ```
/// use evreplay_codec::{EventRecord, TimeVal, RECORD_SIZE};
/// use evreplay_core::{Clock, ManualClock, Replayer};
///
/// let log: Vec<u8> = [
///     EventRecord::new(TimeVal::new(100, 0), 1, 1, 1),
///     EventRecord::new(TimeVal::new(100, 500_000), 2, 1, 0),
/// ]
/// .iter()
/// .flat_map(|r| r.encode())
/// .collect();
///
/// let clock = ManualClock::new(TimeVal::new(5_000, 0));
/// let mut out = Vec::new();
/// let stats = Replayer::new(&clock).run(&log[..], &mut out).unwrap();
///
/// assert_eq!(stats.records, 2);
/// assert_eq!(out.len(), 2 * RECORD_SIZE);
/// assert_eq!(clock.now(), TimeVal::new(5_000, 500_000));
/// ```
#[derive(Debug)]
pub struct Replayer<C> {
    clock: C,
    state: ReplayState,
    stats: ReplayStats,
}

impl<C: Clock> Replayer<C> {
    /// Creates a replayer driven by `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: ReplayState::AwaitingFirstRecord,
            stats: ReplayStats::default(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ReplayState {
        self.state
    }

    /// Statistics collected so far.
    #[must_use]
    pub fn stats(&self) -> &ReplayStats {
        &self.stats
    }

    /// Replays every complete record from `input` into `output`.
    ///
    /// Stops quietly at end of input or at an incomplete trailing record.
    /// Calling `run` again after it has finished returns the same statistics
    /// without touching either stream.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input fails for a reason other than
    /// end of stream, or if writing to the output fails.
    pub fn run<R: Read, W: Write>(&mut self, input: R, output: W) -> ReplayResult<ReplayStats> {
        if self.state == ReplayState::Done {
            return Ok(self.stats.clone());
        }

        let mut reader = RecordReader::new(input);
        let mut writer = RecordWriter::new(output);
        let result = self.pump(&mut reader, &mut writer);

        self.state = ReplayState::Done;
        self.stats.trailing_bytes = reader.trailing_bytes();
        result?;

        if self.stats.trailing_bytes > 0 {
            debug!(
                bytes = self.stats.trailing_bytes,
                "input ended with an incomplete record"
            );
        }
        info!(
            records = self.stats.records,
            delayed = self.stats.delayed,
            late = self.stats.late,
            max_lag_us = self.stats.max_lag.as_micros() as u64,
            "replay finished"
        );

        Ok(self.stats.clone())
    }

    fn pump<R: Read, W: Write>(
        &mut self,
        reader: &mut RecordReader<R>,
        writer: &mut RecordWriter<W>,
    ) -> ReplayResult<()> {
        while let Some(record) = reader.next_record()? {
            let now = self.clock.now();
            let target = self.schedule(&record, now);

            debug!(
                sec = record.time.sec,
                usec = record.time.usec,
                code = record.code,
                event_type = record.event_type,
                value = record.value,
                "event"
            );

            if target > now {
                trace!(%target, %now, "sleeping until target");
                self.stats.delayed += 1;
                sleep_until(&self.clock, target);
            } else {
                trace!(%target, %now, "behind schedule, emitting now");
                self.stats.record_lag(target, now);
            }

            writer.write_record(&record.with_time(target))?;
            self.stats.records += 1;
        }
        Ok(())
    }

    /// Computes the target time of `record`, anchoring the run on the first
    /// call.
    fn schedule(&mut self, record: &EventRecord, now: TimeVal) -> TimeVal {
        let anchors = match self.state {
            ReplayState::Streaming(anchors) => anchors,
            ReplayState::AwaitingFirstRecord | ReplayState::Done => {
                let anchors = Anchors {
                    replay_start: now,
                    record_start: record.time,
                };
                self.state = ReplayState::Streaming(anchors);
                anchors
            }
        };
        anchors.target(record.time)
    }
}

/// Replays `config.input` into `config.device` in real time.
///
/// # Errors
///
/// See [`replay_files_with_clock`].
pub fn replay_files(config: &ReplayConfig) -> ReplayResult<ReplayStats> {
    replay_files_with_clock(config, SystemClock)
}

/// Replays `config.input` into `config.device` using `clock`.
///
/// Both files are opened before either failure is reported, so the output
/// is created even when the input is missing.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, if either file cannot
/// be opened, or if the replay itself fails.
pub fn replay_files_with_clock<C: Clock>(
    config: &ReplayConfig,
    clock: C,
) -> ReplayResult<ReplayStats> {
    config.validate()?;

    let input = File::open(&config.input);
    let output = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(config.truncate_output)
        .open(&config.device);

    let input = input.map_err(|source| ReplayError::OpenInput {
        path: config.input.clone(),
        source,
    })?;
    let output = output.map_err(|source| ReplayError::OpenOutput {
        path: config.device.clone(),
        source,
    })?;

    info!(
        input = %config.input.display(),
        device = %config.device.display(),
        "starting replay"
    );
    Replayer::new(clock).run(BufReader::new(input), output)
}
