//! Record writer.

use crate::error::CodecResult;
use crate::record::EventRecord;
use std::io::Write;

/// Writes records to a sink, one write and one flush per record.
///
/// Device nodes expect each write to carry exactly one event, so records are
/// never batched.
pub struct RecordWriter<W> {
    inner: W,
    records_written: u64,
}

impl<W: Write> RecordWriter<W> {
    /// Creates a writer over the given sink.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            records_written: 0,
        }
    }

    /// Encodes and writes a single record, then flushes the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or flush fails.
    pub fn write_record(&mut self, record: &EventRecord) -> CodecResult<()> {
        self.inner.write_all(&record.encode())?;
        self.inner.flush()?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of records written so far.
    #[must_use]
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Consumes the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RECORD_SIZE;
    use crate::time::TimeVal;
    use std::io;

    /// Records the size of every write and the number of flushes.
    #[derive(Default)]
    struct Probe {
        writes: Vec<usize>,
        flushes: usize,
        bytes: Vec<u8>,
    }

    impl Write for Probe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.push(buf.len());
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn one_write_and_flush_per_record() {
        let mut writer = RecordWriter::new(Probe::default());
        let a = EventRecord::new(TimeVal::new(1, 0), 1, 1, 1);
        let b = EventRecord::new(TimeVal::new(2, 0), 2, 1, 0);
        writer.write_record(&a).unwrap();
        writer.write_record(&b).unwrap();

        assert_eq!(writer.records_written(), 2);
        let probe = writer.into_inner();
        assert_eq!(probe.writes, vec![RECORD_SIZE, RECORD_SIZE]);
        assert_eq!(probe.flushes, 2);
        assert_eq!(&probe.bytes[..RECORD_SIZE], &a.encode());
        assert_eq!(&probe.bytes[RECORD_SIZE..], &b.encode());
    }

    #[test]
    fn write_failure_is_propagated() {
        let mut buf = [0u8; 4];
        let mut writer = RecordWriter::new(&mut buf[..]);
        let record = EventRecord::new(TimeVal::ZERO, 0, 0, 0);
        assert!(writer.write_record(&record).is_err());
        assert_eq!(writer.records_written(), 0);
    }
}
