//! # `localStorage` key-value store for browser-side persistence
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the **web platform**.
//! It reads and writes the window's `localStorage` through [`web_sys::Storage`].
//!
//! ## Connection management
//!
//! `LocalStorageStore` is a zero-size struct that looks up `window.localStorage`
//! on every operation. `web_sys::Storage` is not `Send`, and the lookup is cheap.
//!
//! ## Error handling
//!
//! Reads swallow errors (a blocked or missing storage reads as "no value").
//! Writes surface [`StorageError::Unavailable`] when there is no storage and
//! [`StorageError::Rejected`] when the browser throws (quota, private mode).

use crate::storage::{KeyValueStore, StorageError};

/// `window.localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|e| StorageError::Rejected(format!("{e:?}")))
    }
}
