//! # evreplay Codec
//!
//! Fixed-width binary encoding of input-device event records.
//!
//! A replay log is a flat sequence of 24-byte records with no header,
//! footer, magic number or count. Record boundaries are implied by the
//! record size alone. Field widths and byte order are fixed so that logs
//! move between machines unchanged:
//!
//! - Seconds and microseconds are signed 64-bit integers
//! - Code and type are unsigned 16-bit integers
//! - Value is a signed 32-bit integer
//! - Everything is little-endian
//!
//! ## Usage
//!
//! ```
//! use evreplay_codec::{EventRecord, RecordReader, TimeVal};
//! use std::io::Cursor;
//!
//! let record = EventRecord::new(TimeVal::new(100, 500_000), 2, 1, 0);
//! let bytes = record.encode();
//!
//! let mut reader = RecordReader::new(Cursor::new(bytes.to_vec()));
//! assert_eq!(reader.next_record().unwrap(), Some(record));
//! assert_eq!(reader.next_record().unwrap(), None);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod reader;
mod record;
mod time;
mod writer;

pub use error::{CodecError, CodecResult};
pub use reader::RecordReader;
pub use record::{EventRecord, RECORD_SIZE};
pub use time::TimeVal;
pub use writer::RecordWriter;
