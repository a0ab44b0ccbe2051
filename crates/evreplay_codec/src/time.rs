//! Signed second/microsecond time values.

use std::fmt;
use std::ops::{Add, Sub};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const MICROS_PER_SEC: i64 = 1_000_000;

/// A point in time or a signed interval, split into seconds and microseconds.
///
/// Values decoded from a log are kept verbatim. Arithmetic performs a single
/// borrow or carry on the microsecond field and wraps on overflow, so it never
/// panics on hostile input. Ordering compares seconds first, then microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeVal {
    /// Whole seconds.
    pub sec: i64,
    /// Microseconds, `0..1_000_000` once normalized.
    pub usec: i64,
}

impl TimeVal {
    /// The zero instant / empty interval.
    pub const ZERO: Self = Self { sec: 0, usec: 0 };

    /// Creates a time value from raw fields.
    #[must_use]
    pub const fn new(sec: i64, usec: i64) -> Self {
        Self { sec, usec }
    }

    /// Creates a normalized time value from a microsecond count.
    #[must_use]
    pub const fn from_micros(micros: i64) -> Self {
        Self {
            sec: micros.div_euclid(MICROS_PER_SEC),
            usec: micros.rem_euclid(MICROS_PER_SEC),
        }
    }

    /// Total microseconds represented by this value.
    #[must_use]
    pub const fn as_micros(self) -> i128 {
        self.sec as i128 * MICROS_PER_SEC as i128 + self.usec as i128
    }

    /// Converts a wall-clock instant into seconds and microseconds since the
    /// UNIX epoch. Instants before the epoch become negative values.
    #[must_use]
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(since) => Self {
                sec: i64::try_from(since.as_secs()).unwrap_or(i64::MAX),
                usec: i64::from(since.subsec_micros()),
            },
            Err(before) => {
                let micros = i64::try_from(before.duration().as_micros()).unwrap_or(i64::MAX);
                Self::from_micros(-micros)
            }
        }
    }

    /// Converts a strictly positive interval into a [`Duration`].
    ///
    /// Returns `None` for zero or negative intervals.
    #[must_use]
    pub fn to_duration(self) -> Option<Duration> {
        let micros = self.as_micros();
        if micros <= 0 {
            return None;
        }
        u64::try_from(micros).ok().map(Duration::from_micros)
    }
}

impl Add for TimeVal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut sec = self.sec.wrapping_add(rhs.sec);
        let mut usec = self.usec.wrapping_add(rhs.usec);
        if usec >= MICROS_PER_SEC {
            sec = sec.wrapping_add(1);
            usec -= MICROS_PER_SEC;
        }
        Self { sec, usec }
    }
}

impl Sub for TimeVal {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut sec = self.sec.wrapping_sub(rhs.sec);
        let mut usec = self.usec.wrapping_sub(rhs.usec);
        if usec < 0 {
            sec = sec.wrapping_sub(1);
            usec = usec.wrapping_add(MICROS_PER_SEC);
        }
        Self { sec, usec }
    }
}

impl From<Duration> for TimeVal {
    fn from(duration: Duration) -> Self {
        Self {
            sec: i64::try_from(duration.as_secs()).unwrap_or(i64::MAX),
            usec: i64::from(duration.subsec_micros()),
        }
    }
}

impl fmt::Display for TimeVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.sec, self.usec)
    }
}
