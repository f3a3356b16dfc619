//! # Key-value storage abstraction
//!
//! The console keeps a handful of string values across page loads (the session
//! token, its expiry and the user id). [`KeyValueStore`] is the narrow interface
//! every backend implements:
//!
//! | Backend | Module | Used by |
//! |---------|--------|---------|
//! | [`crate::MemoryStore`] | `memory` | tests, native fallback |
//! | [`crate::FileStore`] | `file_store` | native builds |
//! | `LocalStorageStore` | `local_storage` | browser (WASM + `web` feature) |
//!
//! Reads never fail: a missing or unreadable value is `None`. Writes report
//! [`StorageError`] so callers can decide whether a lost write matters.

use thiserror::Error;

/// Errors raised by a storage backend on write.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("storage write rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
