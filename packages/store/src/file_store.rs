//! # Filesystem-backed key-value store
//!
//! [`FileStore`] keeps each key in its own file under a base directory. It is
//! the native counterpart of the browser's `localStorage`, so a console built
//! for the desktop keeps its session across restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── authToken
//! ├── authTokenExpiry
//! └── userId
//! ```
//!
//! Use `dirs::data_dir()` joined with `"minidoc"` for a platform-appropriate base.

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::storage::{KeyValueStore, StorageError};

/// Filesystem-backed KeyValueStore for native builds.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers; strip separators so a key never escapes the base.
        let name: String = key
            .chars()
            .filter(|c| !matches!(c, '/' | '\\' | '.'))
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("minidoc_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        store.set("authToken", "token-1").unwrap();

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.get("authToken").as_deref(), Some("token-1"));

        reopened.remove("authToken").unwrap();
        assert!(store.get("authToken").is_none());
        // Removing twice is not an error
        assert!(store.remove("authToken").is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_key_cannot_escape_base() {
        let store = FileStore::new(PathBuf::from("/tmp/minidoc-base"));
        let path = store.key_path("../../etc/passwd");
        assert!(path.starts_with("/tmp/minidoc-base"));
    }
}
