//! JSON file-backed key-value store.
//!
//! One flat JSON object per file. Every mutation rewrites the file
//! atomically, so a crash mid-write leaves the previous contents intact.
//! A missing file reads as an empty store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{KeepsakeError, Result};
use crate::fs::write_atomic;
use crate::store::traits::KeyValueStore;

/// Durable store persisting to a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A file that does not exist yet is treated as an empty store; it is
    /// created on the first write.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::Store` if the file exists but cannot be read,
    /// or `KeepsakeError::Validation` if its contents are not a JSON object
    /// of strings.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                KeepsakeError::Store(format!(
                    "Failed to create store directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let entries = if path.exists() {
            let contents = fs::read_to_string(path).map_err(|e| {
                KeepsakeError::Store(format!("Failed to read store {}: {}", path.display(), e))
            })?;
            serde_json::from_str(&contents)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.entries)?;
        write_atomic(&self.path, contents.as_bytes()).map_err(|e| {
            KeepsakeError::Store(format!(
                "Failed to write store {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
