//! Wall-clock time sources.
//!
//! The replayer only needs two things from a clock: the current wall-clock
//! time and a way to block for a while. Production runs use
//! [`SystemClock`]; tests use [`ManualClock`] so timing can be asserted
//! without sleeping for real.

use evreplay_codec::TimeVal;
use parking_lot::Mutex;
use std::time::{Duration, SystemTime};

/// A source of wall-clock time that can also block the caller.
pub trait Clock {
    /// Returns the current wall-clock time.
    fn now(&self) -> TimeVal;

    /// Blocks for roughly `duration`.
    ///
    /// Implementations may return early (for example when a signal
    /// interrupts the wait); [`sleep_until`] compensates.
    fn sleep(&self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> TimeVal {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// The operating system's real-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeVal {
        TimeVal::from_system_time(SystemTime::now())
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A clock that only moves when told to.
///
/// `sleep` advances the clock by exactly the requested duration and records
/// the request, so a replay driven by this clock runs instantly while still
/// producing the timestamps a real run would.
#[derive(Debug, Default)]
pub struct ManualClock {
    state: Mutex<ManualState>,
}

#[derive(Debug, Default)]
struct ManualState {
    now: TimeVal,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub fn new(start: TimeVal) -> Self {
        Self {
            state: Mutex::new(ManualState {
                now: start,
                sleeps: Vec::new(),
            }),
        }
    }

    /// Moves the clock forward without recording a sleep.
    pub fn advance(&self, by: Duration) {
        let mut state = self.state.lock();
        state.now = state.now + TimeVal::from(by);
    }

    /// Returns every sleep requested so far, in order.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.lock().sleeps.clone()
    }

    /// Total time spent sleeping.
    #[must_use]
    pub fn slept(&self) -> Duration {
        self.state.lock().sleeps.iter().sum()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> TimeVal {
        self.state.lock().now
    }

    fn sleep(&self, duration: Duration) {
        let mut state = self.state.lock();
        state.now = state.now + TimeVal::from(duration);
        state.sleeps.push(duration);
    }
}

/// Blocks until `clock` reads at least `target`.
///
/// A wait that ends early is resumed for the remaining time, so the caller
/// never wakes before `target`. Returns immediately if `target` has already
/// passed.
pub fn sleep_until<C: Clock + ?Sized>(clock: &C, target: TimeVal) {
    loop {
        let now = clock.now();
        if target <= now {
            return;
        }
        match (target - now).to_duration() {
            Some(remaining) => clock.sleep(remaining),
            None => return,
        }
    }
}
