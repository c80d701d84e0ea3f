//! Secret digest computation.
//!
//! Secrets are never compared in plain form; the guard compares a
//! lowercase-hex SHA-256 digest of the submitted secret against the
//! reference digest from configuration.

use sha2::{Digest, Sha256};

use crate::error::Result;

/// Digest computation seam.
///
/// Production uses [`Sha256Digest`]. A digest failure is an environment
/// fault (`KeepsakeError::Digest`) and must never be treated as a wrong
/// credential; the trait exists so tests can exercise that path.
pub trait SecretDigest {
    /// Compute the lowercase-hex digest of `secret`.
    fn digest_hex(&self, secret: &str) -> Result<String>;
}

/// SHA-256 digest, encoded as lowercase hex.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Digest;

impl SecretDigest for Sha256Digest {
    fn digest_hex(&self, secret: &str) -> Result<String> {
        Ok(sha256_hex(secret.as_bytes()))
    }
}

/// Lowercase-hex SHA-256 of raw bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
