//! Streaming record reader.

use crate::error::CodecResult;
use crate::record::{EventRecord, RECORD_SIZE};
use std::io::{ErrorKind, Read};

/// Reads fixed-width records one at a time from a byte stream.
///
/// Memory use is constant regardless of log size.
///
/// # Termination
///
/// - Clean end of stream ends iteration
/// - A short final record also ends iteration; its length is kept in
///   [`trailing_bytes`](Self::trailing_bytes) and is not an error
/// - Interrupted reads are retried
/// - Any other I/O error is returned to the caller
pub struct RecordReader<R> {
    inner: R,
    records_read: u64,
    trailing_bytes: usize,
    finished: bool,
}

impl<R: Read> RecordReader<R> {
    /// Creates a reader positioned at the start of a record sequence.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            records_read: 0,
            trailing_bytes: 0,
            finished: false,
        }
    }

    /// Reads the next complete record.
    ///
    /// Returns `Ok(None)` once the stream is exhausted or ends mid-record.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying stream fails.
    pub fn next_record(&mut self) -> CodecResult<Option<EventRecord>> {
        if self.finished {
            return Ok(None);
        }

        let mut buf = [0u8; RECORD_SIZE];
        let mut filled = 0;
        while filled < RECORD_SIZE {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Err(e.into());
                }
            }
        }

        if filled < RECORD_SIZE {
            self.finished = true;
            self.trailing_bytes = filled;
            return Ok(None);
        }

        self.records_read += 1;
        Ok(Some(EventRecord::decode(&buf)))
    }

    /// Number of complete records read so far.
    #[must_use]
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Length of the incomplete record that ended the stream, if any.
    #[must_use]
    pub fn trailing_bytes(&self) -> usize {
        self.trailing_bytes
    }

    /// Returns true once the reader has stopped producing records.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = CodecResult<EventRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
