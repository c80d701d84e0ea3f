//! Injected time source.
//!
//! Lockout expiry and session TTLs are pure time arithmetic, so the current
//! time comes in through a trait rather than being read ambiently. Tests
//! drive the guard with a manual clock that advances on demand.

use chrono::Utc;

/// Time source for lockout and session expiry checks.
pub trait Clock {
    /// Current time as milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall-clock time source used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Settable clock for tests.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: std::cell::Cell<i64>,
}

impl ManualClock {
    /// Create a clock frozen at the given epoch-milliseconds instant.
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: std::cell::Cell::new(now_millis),
        }
    }

    /// Advance the clock by the given number of milliseconds.
    pub fn advance_millis(&self, delta: i64) {
        self.now.set(self.now.get() + delta);
    }

    /// Advance the clock by the given number of seconds.
    pub fn advance_secs(&self, delta: i64) {
        self.advance_millis(delta * 1000);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}
