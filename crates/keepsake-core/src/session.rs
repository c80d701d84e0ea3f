//! Authenticated-session flag.
//!
//! Separate from the guard: after a successful attempt the application
//! records that it is authenticated, with its own expiry (24 hours by
//! default). Ending a session does not touch the guard's attempt history.

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::store::KeyValueStore;

/// Store key holding the authenticated flag ("true" when set).
pub const LOGGED_IN_KEY: &str = "isLoggedIn";

/// Store key holding the session start (epoch milliseconds as string).
pub const LOGIN_TIME_KEY: &str = "loginTime";

/// Default session lifetime in hours.
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// Session state over an injected store.
pub struct Session<S, C = SystemClock> {
    store: S,
    clock: C,
    ttl_ms: i64,
}

impl<S: KeyValueStore> Session<S> {
    /// Create a session manager with the wall clock.
    pub fn new(store: S, ttl_hours: i64) -> Self {
        Self::with_clock(store, SystemClock, ttl_hours)
    }
}

impl<S, C> Session<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    /// Create a session manager with an explicit clock.
    pub fn with_clock(store: S, clock: C, ttl_hours: i64) -> Self {
        Self {
            store,
            clock,
            ttl_ms: ttl_hours * 60 * 60 * 1000,
        }
    }

    /// Record a fresh authenticated session starting now.
    pub fn start(&mut self) -> Result<()> {
        self.store.set(LOGGED_IN_KEY, "true")?;
        self.store
            .set(LOGIN_TIME_KEY, &self.clock.now_millis().to_string())
    }

    /// Whether an unexpired session exists. An expired or malformed session
    /// is cleared on read.
    pub fn is_active(&mut self) -> Result<bool> {
        let logged_in = self
            .store
            .get(LOGGED_IN_KEY)?
            .map(|v| v == "true")
            .unwrap_or(false);
        if !logged_in {
            return Ok(false);
        }

        let started: Option<i64> = self
            .store
            .get(LOGIN_TIME_KEY)?
            .and_then(|v| v.parse().ok());
        match started {
            Some(start) if self.clock.now_millis() - start < self.ttl_ms => Ok(true),
            _ => {
                self.end()?;
                Ok(false)
            }
        }
    }

    /// End the session. The guard's attempt history is deliberately left
    /// alone.
    pub fn end(&mut self) -> Result<()> {
        self.store.remove(LOGGED_IN_KEY)?;
        self.store.remove(LOGIN_TIME_KEY)
    }

    /// Consume the manager and hand back the store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::guard::ATTEMPTS_KEY;
    use crate::store::MemoryStore;

    const EPOCH: i64 = 1_700_000_000_000;

    #[test]
    fn test_start_and_check() {
        let clock = ManualClock::new(EPOCH);
        let mut session = Session::with_clock(MemoryStore::new(), &clock, 24);
        assert!(!session.is_active().unwrap());

        session.start().unwrap();
        assert!(session.is_active().unwrap());

        clock.advance_secs(23 * 60 * 60);
        assert!(session.is_active().unwrap());
    }

    #[test]
    fn test_expires_after_ttl() {
        let clock = ManualClock::new(EPOCH);
        let mut session = Session::with_clock(MemoryStore::new(), &clock, 24);
        session.start().unwrap();

        clock.advance_secs(24 * 60 * 60);
        assert!(!session.is_active().unwrap());

        // Expiry clears the persisted flags.
        let store = session.into_store();
        assert_eq!(store.get(LOGGED_IN_KEY).unwrap(), None);
        assert_eq!(store.get(LOGIN_TIME_KEY).unwrap(), None);
    }

    #[test]
    fn test_flag_without_timestamp_is_cleared() {
        let clock = ManualClock::new(EPOCH);
        let mut store = MemoryStore::new();
        store.set(LOGGED_IN_KEY, "true").unwrap();

        let mut session = Session::with_clock(store, &clock, 24);
        assert!(!session.is_active().unwrap());
    }

    #[test]
    fn test_end_leaves_attempt_history() {
        let clock = ManualClock::new(EPOCH);
        let mut store = MemoryStore::new();
        store.set(ATTEMPTS_KEY, "2").unwrap();

        let mut session = Session::with_clock(store, &clock, 24);
        session.start().unwrap();
        session.end().unwrap();

        assert!(!session.is_active().unwrap());
        let store = session.into_store();
        assert_eq!(store.get(ATTEMPTS_KEY).unwrap().as_deref(), Some("2"));
    }
}
