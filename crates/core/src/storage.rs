//! Client Storage
//!
//! Durable key-value string storage scoped to one shopper session, the
//! contract the browser's local storage exposed to the original storefront.
//! The cart and stored lists persist themselves through this trait on every
//! mutation.

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors raised while reading or writing client storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted payload could not be serialized.
    #[error("failed to serialize payload for key {key}: {source}")]
    Serialize {
        /// Storage key being written.
        key: String,
        /// Underlying serializer error.
        source: serde_json::Error,
    },

    /// A persisted payload could not be parsed back.
    #[error("failed to parse payload for key {key}: {source}")]
    Deserialize {
        /// Storage key being read.
        key: String,
        /// Underlying parser error.
        source: serde_json::Error,
    },
}

/// Durable string key-value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` when the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` when the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` when the backing store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory storage, used by tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);

        Ok(())
    }
}

/// File-backed storage: all keys live in a single JSON document rewritten on
/// every mutation, which keeps the durability model as simple as the browser
/// storage it replaces.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileStore {
    /// Opens (or creates) the store backed by the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` when the file exists but cannot be read or
    /// does not contain a JSON string map.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let values = match fs::read_to_string(&path) {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|source| StorageError::Deserialize {
                    key: path.display().to_string(),
                    source,
                })?
            }
            Err(error) if error.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(error) => return Err(StorageError::Io(error)),
        };

        Ok(Self { path, values })
    }

    fn flush(&self) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(&self.values).map_err(|source| StorageError::Serialize {
                key: self.path.display().to_string(),
                source,
            })?;

        fs::write(&self.path, raw)?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());

        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }

        Ok(())
    }
}
