//! Replay run statistics.

use evreplay_codec::TimeVal;
use std::time::Duration;

/// Counters collected over one replay run.
///
/// Lag is only observed. The replayer never skips or compresses later delays
/// to make up for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Records written to the output.
    pub records: u64,
    /// Records that had to wait for their target time.
    pub delayed: u64,
    /// Records emitted after their target time had already passed.
    pub late: u64,
    /// Largest observed gap between a record's target time and its emission.
    pub max_lag: Duration,
    /// Length of the incomplete record that ended the input, if any.
    pub trailing_bytes: usize,
}

impl ReplayStats {
    /// Accounts for a record whose target time had already passed.
    pub(crate) fn record_lag(&mut self, target: TimeVal, now: TimeVal) {
        if let Some(lag) = (now - target).to_duration() {
            self.late += 1;
            self.max_lag = self.max_lag.max(lag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lag_tracks_maximum() {
        let mut stats = ReplayStats::default();
        stats.record_lag(TimeVal::new(10, 0), TimeVal::new(10, 300));
        stats.record_lag(TimeVal::new(11, 0), TimeVal::new(11, 100));
        assert_eq!(stats.late, 2);
        assert_eq!(stats.max_lag, Duration::from_micros(300));
    }

    #[test]
    fn on_time_is_not_late() {
        let mut stats = ReplayStats::default();
        stats.record_lag(TimeVal::new(10, 0), TimeVal::new(10, 0));
        assert_eq!(stats.late, 0);
        assert_eq!(stats.max_lag, Duration::ZERO);
    }
}
