//! Durable key-value storage.
//!
//! The portal keeps all of its state under a handful of string keys, the
//! same way a browser app keeps it in `localStorage`. [`KeyValueStorage`] is
//! that contract; [`FileStorage`] persists each key as a file in a data
//! directory and [`MemoryStorage`] keeps everything in process for tests.

mod file;
mod memory;

use std::sync::Arc;

use thiserror::Error;

use crate::config::{BackendType, StorageConfig};

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a key failed.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A previous writer panicked while holding the backend lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String-keyed durable storage.
///
/// Every call completes synchronously; a successful `set` is durable when it
/// returns.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored at `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` at `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Open the backend selected by `config`.
///
/// # Errors
///
/// Returns [`StorageError`] if the file backend's data directory cannot be
/// created.
pub fn open_storage(config: &StorageConfig) -> Result<Arc<dyn KeyValueStorage>, StorageError> {
    match config.backend {
        BackendType::Memory => {
            tracing::info!("Using in-memory storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
        BackendType::File => {
            let storage = FileStorage::open(&config.data_dir)?;
            tracing::info!(data_dir = %config.data_dir.display(), "Using file storage");
            Ok(Arc::new(storage))
        }
    }
}
