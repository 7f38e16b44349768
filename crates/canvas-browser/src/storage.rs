//! `window.localStorage` as a `KeyValueStore`.
//!
//! Values are stored raw rather than through gloo's JSON helpers: the theme
//! key holds a bare `light`/`dark` literal and the snippet key already holds
//! serialized JSON.

use canvas_core::{KeyValueStore, StorageError};
use gloo_storage::{LocalStorage, Storage};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        // `LocalStorage::raw` panics when storage is blocked, so probe first.
        match window.local_storage() {
            Ok(Some(_)) => Ok(LocalStorage::raw()),
            Ok(None) => Err(StorageError::Unavailable("localStorage is disabled".into())),
            Err(e) => Err(StorageError::Unavailable(format!("{e:?}"))),
        }
    }
}

impl KeyValueStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read {
                key: key.to_string(),
                message: format!("{e:?}"),
            })
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(|e| {
            tracing::warn!(target: "canvas::storage", key, "localStorage write failed: {:?}", e);
            StorageError::Write {
                key: key.to_string(),
                message: format!("{e:?}"),
            }
        })
    }
}
