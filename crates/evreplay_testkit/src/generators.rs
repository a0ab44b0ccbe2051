//! Property-based test generators using proptest.
//!
//! Provides strategies for generating records and recordings
//! that maintain the invariants real logs have.

use evreplay_codec::{EventRecord, TimeVal};
use proptest::prelude::*;

/// Strategy for normalized timestamps in a realistic range.
pub fn timeval_strategy() -> impl Strategy<Value = TimeVal> {
    (0i64..4_000_000_000, 0i64..1_000_000).prop_map(|(sec, usec)| TimeVal::new(sec, usec))
}

/// Strategy for single records with arbitrary payloads.
pub fn event_record_strategy() -> impl Strategy<Value = EventRecord> {
    (timeval_strategy(), any::<u16>(), any::<u16>(), any::<i32>())
        .prop_map(|(time, code, event_type, value)| EventRecord::new(time, code, event_type, value))
}

/// Strategy for recordings with non-decreasing timestamps.
///
/// Consecutive records are at most `max_gap_us` microseconds apart; gaps of
/// zero are common, as in real input where a sync follows each event.
pub fn recording_strategy(
    min_len: usize,
    max_len: usize,
    max_gap_us: i64,
) -> impl Strategy<Value = Vec<EventRecord>> {
    (
        timeval_strategy(),
        prop::collection::vec(
            (
                prop_oneof![1 => Just(0i64), 3 => 0..=max_gap_us],
                any::<u16>(),
                any::<u16>(),
                any::<i32>(),
            ),
            min_len..max_len,
        ),
    )
        .prop_map(|(start, events)| {
            let mut time = start;
            events
                .into_iter()
                .enumerate()
                .map(|(i, (gap, code, event_type, value))| {
                    if i > 0 {
                        time = time + TimeVal::from_micros(gap);
                    }
                    EventRecord::new(time, code, event_type, value)
                })
                .collect()
        })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
