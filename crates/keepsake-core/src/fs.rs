//! Filesystem utilities for atomic store writes.

use std::fs;
use std::io;
use std::path::Path;

/// Write `contents` to `path` atomically: write a sibling temp file, then
/// rename it over the destination.
///
/// On some platforms (notably Windows), `fs::rename` fails if the destination
/// already exists. That case is handled by removing the destination first and
/// retrying. If the rename ultimately fails, the temp file is cleaned up.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or if the rename
/// fails even after the fallback attempt.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, contents)?;

    if let Err(initial_err) = fs::rename(&temp_path, path) {
        // Best-effort replace on platforms where rename fails if target exists.
        let _ = fs::remove_file(path);
        fs::rename(&temp_path, path).map_err(|retry_err| {
            let _ = fs::remove_file(&temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic write failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_new_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("store.json");

        write_atomic(&dest, b"{}").unwrap();

        assert!(dest.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "{}");
        assert!(!dir.path().join("store.tmp").exists());
    }

    #[test]
    fn test_write_overwrites_existing() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("store.json");

        fs::write(&dest, b"old").unwrap();
        write_atomic(&dest, b"new").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }
}
