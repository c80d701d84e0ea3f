//! Credential verification and lockout enforcement.
//!
//! The guard validates a submitted identity/secret pair against a fixed
//! reference credential, counts consecutive failures, and enforces a timed
//! lockout once the failure ceiling is reached. Counter and lockout survive
//! a restart because both live in the injected [`KeyValueStore`].
//!
//! State machine:
//!
//! ```text
//! Unlocked(n) --success-------------> Unlocked(0)
//! Unlocked(n) --failure, n+1 < max--> Unlocked(n+1)
//! Unlocked(max-1) --failure---------> Locked(now + lock_duration)
//! Locked(t)   --now >= t------------> Unlocked(0)
//! Locked(t)   --attempt, now < t----> Locked(t)   (rejected, no mutation)
//! ```

mod digest;

pub use digest::{sha256_hex, SecretDigest, Sha256Digest};

use subtle::ConstantTimeEq;

use crate::clock::{Clock, SystemClock};
use crate::error::{KeepsakeError, Result};
use crate::store::KeyValueStore;

/// Store key holding the consecutive-failure count (integer as string).
pub const ATTEMPTS_KEY: &str = "loginAttempts";

/// Store key holding the lockout expiry (epoch milliseconds as string).
pub const LOCK_END_KEY: &str = "lockEndTime";

/// The fixed identity and secret digest the guard checks against.
///
/// This is deployment-time configuration, not user data. Note that anything
/// shipped client-side is readable by the client; this gates a personal
/// site, it is not real authentication.
#[derive(Debug, Clone)]
pub struct ReferenceCredential {
    identity: String,
    secret_digest_hex: String,
}

impl ReferenceCredential {
    /// Create a reference credential from an identity and a lowercase-hex
    /// SHA-256 digest of the secret.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::Validation` if the digest is not 64 hex
    /// characters.
    pub fn new(identity: impl Into<String>, secret_digest_hex: impl Into<String>) -> Result<Self> {
        let digest = secret_digest_hex.into().to_ascii_lowercase();
        if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(KeepsakeError::Validation(format!(
                "Reference digest must be 64 hex characters (got {})",
                digest.len()
            )));
        }
        Ok(Self {
            identity: identity.into(),
            secret_digest_hex: digest,
        })
    }

    /// Build a reference credential by digesting the secret directly.
    /// Intended for tests and `init`-style tooling.
    pub fn from_secret(identity: impl Into<String>, secret: &str) -> Self {
        Self {
            identity: identity.into(),
            secret_digest_hex: sha256_hex(secret.as_bytes()),
        }
    }

    /// The reference identity.
    pub fn identity(&self) -> &str {
        &self.identity
    }
}

/// Failure ceiling and lockout duration.
#[derive(Debug, Clone, Copy)]
pub struct GuardPolicy {
    /// Consecutive failures that trigger a lockout.
    pub max_attempts: u32,
    /// How long a lockout lasts, in milliseconds.
    pub lock_duration_ms: i64,
}

impl Default for GuardPolicy {
    /// Three strikes, five minutes out.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            lock_duration_ms: 5 * 60 * 1000,
        }
    }
}

/// Result of a lock-state query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockStatus {
    /// Whether the guard currently rejects attempts.
    pub locked: bool,
    /// Seconds until the lock clears (0 when unlocked). Rounded up, so a
    /// live lock never reports 0.
    pub remaining_seconds: u64,
}

impl LockStatus {
    fn unlocked() -> Self {
        Self {
            locked: false,
            remaining_seconds: 0,
        }
    }
}

/// Outcome of a single authentication attempt.
///
/// Identity and secret failures are reported identically so the caller
/// cannot tell which field was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Both identity and secret matched; counter and lock cleared.
    Success,
    /// Mismatch below the failure ceiling; the caller may retry.
    InvalidCredentials {
        /// Attempts left before a lockout.
        attempts_remaining: u32,
    },
    /// This mismatch reached the ceiling and created a lockout window.
    LockedOut {
        /// Consecutive failures consumed, including this one.
        attempts_used: u32,
    },
    /// Attempt made while already locked; rejected without consuming an
    /// attempt.
    Locked {
        /// Seconds until the lock clears.
        remaining_seconds: u64,
    },
}

/// Credential guard over an injected store, clock, and digest.
///
/// All persisted mutation goes through [`CredentialGuard::attempt`];
/// [`CredentialGuard::check_lock_status`] only writes when it clears an
/// expired lock. The caller must not run two attempts concurrently (the
/// presentation layer disables resubmission while one is in flight).
pub struct CredentialGuard<S, C = SystemClock, D = Sha256Digest> {
    store: S,
    clock: C,
    digest: D,
    reference: ReferenceCredential,
    policy: GuardPolicy,
}

impl<S: KeyValueStore> CredentialGuard<S> {
    /// Create a guard with the wall clock and SHA-256 digest.
    pub fn new(store: S, reference: ReferenceCredential, policy: GuardPolicy) -> Self {
        Self::with_parts(store, SystemClock, Sha256Digest, reference, policy)
    }
}

impl<S, C, D> CredentialGuard<S, C, D>
where
    S: KeyValueStore,
    C: Clock,
    D: SecretDigest,
{
    /// Create a guard with explicit clock and digest implementations.
    pub fn with_parts(
        store: S,
        clock: C,
        digest: D,
        reference: ReferenceCredential,
        policy: GuardPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            digest,
            reference,
            policy,
        }
    }

    /// Consume the guard and hand back the store (e.g. to start a session
    /// over the same file after a successful attempt).
    pub fn into_store(self) -> S {
        self.store
    }

    /// Consecutive failed attempts currently recorded.
    pub fn failed_attempts(&self) -> Result<u32> {
        Ok(self
            .store
            .get(ATTEMPTS_KEY)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(0))
    }

    /// Query the lock state, clearing an expired lock as a side effect.
    ///
    /// Safe to poll: once a lock is fully established or fully expired,
    /// repeated calls do not change observable state.
    pub fn check_lock_status(&mut self) -> Result<LockStatus> {
        let Some(raw) = self.store.get(LOCK_END_KEY)? else {
            return Ok(LockStatus::unlocked());
        };

        // An unparseable expiry cannot be waited out; treat it as expired.
        let lock_end: i64 = match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                self.clear_lock_state()?;
                return Ok(LockStatus::unlocked());
            }
        };

        let now = self.clock.now_millis();
        if now >= lock_end {
            self.clear_lock_state()?;
            return Ok(LockStatus::unlocked());
        }

        Ok(LockStatus {
            locked: true,
            remaining_seconds: remaining_seconds(lock_end, now),
        })
    }

    /// Validate an identity/secret pair and advance the lockout state
    /// machine.
    ///
    /// Empty strings are ordinary inputs that simply fail comparison.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::Digest` if the hashing primitive fails; the
    /// attempt counter is not touched in that case. Store errors propagate
    /// unchanged.
    pub fn attempt(&mut self, identity: &str, secret: &str) -> Result<Outcome> {
        let status = self.check_lock_status()?;
        if status.locked {
            return Ok(Outcome::Locked {
                remaining_seconds: status.remaining_seconds,
            });
        }

        // Digest before any counter mutation: a digest fault must not
        // consume an attempt.
        let submitted = self.digest.digest_hex(secret)?.to_ascii_lowercase();

        let identity_ok = identity == self.reference.identity;
        let digest_ok: bool = submitted
            .as_bytes()
            .ct_eq(self.reference.secret_digest_hex.as_bytes())
            .into();

        if !identity_ok || !digest_ok {
            let attempts = self.failed_attempts()? + 1;

            if attempts >= self.policy.max_attempts {
                // Creating the window resets the counter.
                let lock_end = self.clock.now_millis() + self.policy.lock_duration_ms;
                self.store.set(LOCK_END_KEY, &lock_end.to_string())?;
                self.store.remove(ATTEMPTS_KEY)?;
                return Ok(Outcome::LockedOut {
                    attempts_used: attempts,
                });
            }

            self.store.set(ATTEMPTS_KEY, &attempts.to_string())?;
            return Ok(Outcome::InvalidCredentials {
                attempts_remaining: self.policy.max_attempts - attempts,
            });
        }

        self.clear_lock_state()?;
        Ok(Outcome::Success)
    }

    fn clear_lock_state(&mut self) -> Result<()> {
        self.store.remove(ATTEMPTS_KEY)?;
        self.store.remove(LOCK_END_KEY)
    }
}

/// Seconds until `lock_end`, rounded up.
fn remaining_seconds(lock_end: i64, now: i64) -> u64 {
    let millis = lock_end.saturating_sub(now).max(0);
    ((millis + 999) / 1000) as u64
}
