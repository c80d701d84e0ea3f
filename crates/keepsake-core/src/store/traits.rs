//! Key-value store trait definition.
//!
//! The `KeyValueStore` trait defines the interface that all persistence
//! backends must implement. This abstraction lets the guard and session be
//! tested against an in-memory substitute while production uses a durable
//! file-backed store.

use crate::error::Result;

/// Durable string key-value store.
///
/// Semantics match a browser's local storage: string keys, string values,
/// absence of a key means "no value". All implementations must ensure:
///
/// - `set` followed by `get` of the same key returns the written value
/// - `remove` of an absent key is not an error
/// - values survive for the lifetime of the backing medium (a reload of the
///   application sees what the previous instance wrote)
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(value))` if present, `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::Store` if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::Store` if the backing medium cannot be
    /// written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`, if any.
    ///
    /// Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::Store` if the backing medium cannot be
    /// written.
    fn remove(&mut self, key: &str) -> Result<()>;
}
