//! # Keepsake Core
//!
//! Core library for Keepsake - a password-gated personal memories vault.
//!
//! This crate provides the domain logic independent of the CLI interface:
//! the credential guard with its lockout state machine, the session flag,
//! the milestone timeline, and the special-date message generator.
//!
//! ## Architecture
//!
//! - **store**: Key-value store trait and implementations
//! - **clock**: Injected time source
//! - **guard**: Credential verification and lockout enforcement
//! - **session**: Authenticated-session flag with expiry
//! - **timeline**: Milestone records (the gated content)
//! - **surprise**: Date-keyed surprise messages
//!
//! ## Security model
//!
//! The reference credential (identity plus a SHA-256 digest of the secret)
//! lives in client-side configuration. This is deliberate demo-grade gating
//! for personal use, not real authentication: anyone with the config file
//! can read the digest. Genuine access control requires a server boundary.

pub mod clock;
pub mod error;
pub mod fs;
pub mod guard;
pub mod session;
pub mod store;
pub mod surprise;
pub mod timeline;

pub use clock::{Clock, SystemClock};
pub use error::{KeepsakeError, Result};
pub use guard::{CredentialGuard, GuardPolicy, LockStatus, Outcome, ReferenceCredential};
pub use session::Session;
pub use store::KeyValueStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
