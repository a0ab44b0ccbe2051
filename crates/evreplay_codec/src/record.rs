//! Event record type and its fixed-width wire layout.

use crate::error::{CodecError, CodecResult};
use crate::time::TimeVal;

/// Encoded size of one record in bytes.
///
/// sec (8) + usec (8) + code (2) + type (2) + value (4) = 24 bytes
pub const RECORD_SIZE: usize = 24;

const SEC_RANGE: std::ops::Range<usize> = 0..8;
const USEC_RANGE: std::ops::Range<usize> = 8..16;
const CODE_RANGE: std::ops::Range<usize> = 16..18;
const TYPE_RANGE: std::ops::Range<usize> = 18..20;
const VALUE_RANGE: std::ops::Range<usize> = 20..24;

/// A single input-device event as stored in a replay log.
///
/// # Wire Format
///
/// All fields are little-endian, with no padding, header or separator:
///
/// ```text
/// ┌──────────┬──────────┬────────┬────────┬─────────┐
/// │ sec i64  │ usec i64 │ code   │ type   │ value   │
/// │ 8 bytes  │ 8 bytes  │ u16    │ u16    │ i32     │
/// └──────────┴──────────┴────────┴────────┴─────────┘
/// ```
///
/// Note that `code` precedes `type`, unlike the kernel's `struct input_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventRecord {
    /// Event timestamp.
    pub time: TimeVal,
    /// Device-specific event code.
    pub code: u16,
    /// Device-specific event type.
    pub event_type: u16,
    /// Device-specific event value.
    pub value: i32,
}

impl EventRecord {
    /// Creates a new record.
    #[must_use]
    pub const fn new(time: TimeVal, code: u16, event_type: u16, value: i32) -> Self {
        Self {
            time,
            code,
            event_type,
            value,
        }
    }

    /// Returns a copy of this record stamped with a different time.
    #[must_use]
    pub const fn with_time(self, time: TimeVal) -> Self {
        Self { time, ..self }
    }

    /// Encodes the record into its fixed-width representation.
    #[must_use]
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        buf[SEC_RANGE].copy_from_slice(&self.time.sec.to_le_bytes());
        buf[USEC_RANGE].copy_from_slice(&self.time.usec.to_le_bytes());
        buf[CODE_RANGE].copy_from_slice(&self.code.to_le_bytes());
        buf[TYPE_RANGE].copy_from_slice(&self.event_type.to_le_bytes());
        buf[VALUE_RANGE].copy_from_slice(&self.value.to_le_bytes());
        buf
    }

    /// Decodes a record from exactly [`RECORD_SIZE`] bytes.
    #[must_use]
    pub fn decode(buf: &[u8; RECORD_SIZE]) -> Self {
        let sec = i64::from_le_bytes([
            buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
        ]);
        let usec = i64::from_le_bytes([
            buf[8], buf[9], buf[10], buf[11], buf[12], buf[13], buf[14], buf[15],
        ]);
        let code = u16::from_le_bytes([buf[16], buf[17]]);
        let event_type = u16::from_le_bytes([buf[18], buf[19]]);
        let value = i32::from_le_bytes([buf[20], buf[21], buf[22], buf[23]]);

        Self {
            time: TimeVal::new(sec, usec),
            code,
            event_type,
            value,
        }
    }

    /// Decodes a record from the front of `bytes`.
    ///
    /// Bytes beyond the first [`RECORD_SIZE`] are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TruncatedRecord`] if fewer than [`RECORD_SIZE`]
    /// bytes are available.
    pub fn decode_slice(bytes: &[u8]) -> CodecResult<Self> {
        let head: &[u8; RECORD_SIZE] = bytes
            .get(..RECORD_SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| CodecError::truncated(RECORD_SIZE, bytes.len()))?;
        Ok(Self::decode(head))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_layout_is_little_endian() {
        let record = EventRecord::new(TimeVal::new(0x0102, 0x0304), 0x0506, 0x0708, -2);
        let bytes = record.encode();

        assert_eq!(&bytes[0..8], &[0x02, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..16], &[0x04, 0x03, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[16..18], &[0x06, 0x05]);
        assert_eq!(&bytes[18..20], &[0x08, 0x07]);
        assert_eq!(&bytes[20..24], &[0xfe, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn decode_inverts_encode() {
        let record = EventRecord::new(TimeVal::new(100, 500_000), 2, 1, 0);
        assert_eq!(EventRecord::decode(&record.encode()), record);
    }

    #[test]
    fn decode_slice_rejects_short_input() {
        let bytes = [0u8; RECORD_SIZE - 10];
        let err = EventRecord::decode_slice(&bytes).unwrap_err();
        assert!(matches!(
            err,
            CodecError::TruncatedRecord {
                expected: RECORD_SIZE,
                actual: 14
            }
        ));
    }

    #[test]
    fn decode_slice_ignores_trailing_bytes() {
        let record = EventRecord::new(TimeVal::new(7, 8), 9, 10, 11);
        let mut bytes = record.encode().to_vec();
        bytes.extend_from_slice(&[0xaa; 5]);
        assert_eq!(EventRecord::decode_slice(&bytes).unwrap(), record);
    }

    #[test]
    fn with_time_keeps_payload() {
        let record = EventRecord::new(TimeVal::new(1, 2), 3, 4, 5);
        let moved = record.with_time(TimeVal::new(9, 0));
        assert_eq!(moved.time, TimeVal::new(9, 0));
        assert_eq!((moved.code, moved.event_type, moved.value), (3, 4, 5));
    }
}
