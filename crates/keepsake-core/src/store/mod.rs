//! Key-value store backends.
//!
//! The guard and session hold no ambient global state; everything they
//! persist goes through the [`KeyValueStore`] capability handed to them at
//! construction. The durable backend is a single JSON file; tests use the
//! in-memory substitute.

mod json_file;
mod memory;
mod traits;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
