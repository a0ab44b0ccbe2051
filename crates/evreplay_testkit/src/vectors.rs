//! Canonical record encodings.
//!
//! These vectors pin the byte layout of a record so that log producers
//! written in other languages can check their output against the replayer.

use evreplay_codec::{EventRecord, TimeVal};
use serde::{Deserialize, Serialize};

/// A record and its expected encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Timestamp seconds.
    pub sec: i64,
    /// Timestamp microseconds.
    pub usec: i64,
    /// Event code.
    pub code: u16,
    /// Event type.
    pub event_type: u16,
    /// Event value.
    pub value: i32,
    /// Expected encoding (hex).
    pub expected_hex: String,
}

impl RecordVector {
    /// The record described by this vector.
    #[must_use]
    pub fn record(&self) -> EventRecord {
        EventRecord::new(
            TimeVal::new(self.sec, self.usec),
            self.code,
            self.event_type,
            self.value,
        )
    }
}

/// Record encoding vectors.
pub fn record_vectors() -> Vec<RecordVector> {
    vec![
        RecordVector {
            id: "record_zero".into(),
            description: "All fields zero".into(),
            sec: 0,
            usec: 0,
            code: 0,
            event_type: 0,
            value: 0,
            expected_hex: "00".repeat(24),
        },
        RecordVector {
            id: "record_key_release".into(),
            description: "Key release at 100.5s".into(),
            sec: 100,
            usec: 500_000,
            code: 2,
            event_type: 1,
            value: 0,
            expected_hex: "6400000000000000\
                           20a1070000000000\
                           0200\
                           0100\
                           00000000"
                .into(),
        },
        RecordVector {
            id: "record_abs_negative".into(),
            description: "Absolute axis, max code, negative value".into(),
            sec: 1_700_000_000,
            usec: 999_999,
            code: 0xffff,
            event_type: 3,
            value: -1,
            expected_hex: "00f1536500000000\
                           3f420f0000000000\
                           ffff\
                           0300\
                           ffffffff"
                .into(),
        },
        RecordVector {
            id: "record_pre_epoch".into(),
            description: "Negative seconds and minimum value".into(),
            sec: -1,
            usec: 0,
            code: 1,
            event_type: 0,
            value: i32::MIN,
            expected_hex: "ffffffffffffffff\
                           0000000000000000\
                           0100\
                           0000\
                           00000080"
                .into(),
        },
    ]
}

/// Serializes all vectors to pretty-printed JSON.
pub fn record_vectors_json() -> String {
    serde_json::to_string_pretty(&record_vectors()).expect("Failed to serialize vectors")
}

/// Encodes bytes as lowercase hexadecimal.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decodes a hexadecimal string, ignoring whitespace.
pub fn hex_decode(hex: &str) -> Vec<u8> {
    let hex = hex.replace([' ', '\n', '\r'], "");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Invalid hex"))
        .collect()
}
