//! Temporary log files and canned recordings.

use evreplay_codec::{CodecResult, EventRecord, RecordReader, TimeVal};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An input log and an output file inside a temporary directory.
///
/// The directory is removed when this value is dropped.
pub struct TempLog {
    input: PathBuf,
    output: PathBuf,
    dir: TempDir,
}

impl TempLog {
    /// Creates an empty input log.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let input = temp_dir.path().join("input.evlog");
        let output = temp_dir.path().join("output.evlog");
        fs::write(&input, b"").expect("Failed to create input log");
        Self {
            input,
            output,
            dir: temp_dir,
        }
    }

    /// Creates an input log holding `records`.
    pub fn with_records(records: &[EventRecord]) -> Self {
        let log = Self::new();
        log.write_records(records);
        log
    }

    /// Replaces the input log with `records`.
    pub fn write_records(&self, records: &[EventRecord]) {
        self.write_bytes(&encode_records(records));
    }

    /// Replaces the input log with raw bytes.
    pub fn write_bytes(&self, bytes: &[u8]) {
        fs::write(&self.input, bytes).expect("Failed to write input log");
    }

    /// Path of the input log.
    pub fn input_path(&self) -> &Path {
        &self.input
    }

    /// Path the replay output should be written to.
    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// A path inside the temporary directory that does not exist.
    pub fn missing_path(&self) -> PathBuf {
        self.dir.path().join("missing").join("nothing.evlog")
    }

    /// Raw bytes written to the output file.
    pub fn output_bytes(&self) -> Vec<u8> {
        fs::read(&self.output).expect("Failed to read output file")
    }

    /// Complete records written to the output file.
    pub fn output_records(&self) -> Vec<EventRecord> {
        decode_records(&self.output_bytes())
    }
}

impl Default for TempLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes records back to back.
pub fn encode_records(records: &[EventRecord]) -> Vec<u8> {
    records.iter().flat_map(|r| r.encode()).collect()
}

/// Decodes every complete record in `bytes`, ignoring a partial tail.
pub fn decode_records(bytes: &[u8]) -> Vec<EventRecord> {
    RecordReader::new(bytes)
        .collect::<CodecResult<Vec<_>>>()
        .expect("Reading from a byte slice cannot fail")
}

/// Canned recordings.
pub mod scenarios {
    use super::*;

    /// Three key events at 100.000s, 100.500s and 101.200s.
    pub fn three_events() -> Vec<EventRecord> {
        vec![
            EventRecord::new(TimeVal::new(100, 0), 1, 1, 1),
            EventRecord::new(TimeVal::new(100, 500_000), 2, 1, 0),
            EventRecord::new(TimeVal::new(101, 200_000), 1, 1, 0),
        ]
    }

    /// A key press, a sync, and the release `hold_us` microseconds later.
    pub fn key_tap(start: TimeVal, code: u16, hold_us: i64) -> Vec<EventRecord> {
        let release = start + TimeVal::from_micros(hold_us);
        vec![
            EventRecord::new(start, code, 1, 1),
            EventRecord::new(start, 0, 0, 0),
            EventRecord::new(release, code, 1, 0),
            EventRecord::new(release, 0, 0, 0),
        ]
    }
}
