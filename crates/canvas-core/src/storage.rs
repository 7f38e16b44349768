//! Key-value persistence seam.
//!
//! The playground persists two keys: the theme literal and the snippet
//! collection as one JSON array. Any store that can read and write strings
//! by key satisfies `KeyValueStore`; the browser build uses local storage,
//! tests use `MemoryStore`, native hosts can use `FileStore`.

use std::collections::BTreeMap;
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
use std::path::{Path, PathBuf};

/// Key holding `"light"` or `"dark"`.
pub const THEME_KEY: &str = "code-canvas-theme";

/// Key holding the JSON array of saved snippets.
pub const SNIPPETS_KEY: &str = "codeSnippets";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The backing store cannot be reached at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading a key failed.
    #[error("failed to read `{key}`: {message}")]
    Read { key: String, message: String },

    /// Writing a key failed (quota, permissions, ...).
    #[error("failed to write `{key}`: {message}")]
    Write { key: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Narrow string store. Absent keys read as `None`.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate one key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON object holding every key.
///
/// The whole file is rewritten on each write. A missing file is an empty
/// store.
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Read {
            key: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load_map()?.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.load_map()?;
        map.insert(key.to_string(), value.to_string());
        let serialized = serde_json::to_string_pretty(&map).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serialized)?;
        tracing::trace!(target: "canvas::storage", key, path = %self.path.display(), "wrote key");
        Ok(())
    }
}
