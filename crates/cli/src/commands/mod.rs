//! Command implementations.
//!
//! Every command works on the same storage backend the portal uses, opened
//! from the portal's environment configuration.

pub mod account;
pub mod store;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use staff_portal::config::{BackendType, ConfigError, StorageConfig};
use staff_portal::storage::{KeyValueStorage, StorageError, open_storage};
use thiserror::Error;

/// Errors that can occur while opening the storage backend.
#[derive(Debug, Error)]
pub enum OpenError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The memory backend keeps nothing between runs.
    #[error("PORTAL_STORAGE=memory has no persisted store to manage")]
    MemoryBackend,

    /// The backend could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Open the configured file backend, optionally at another directory.
///
/// # Errors
///
/// Returns `OpenError` if the configuration is invalid, selects the memory
/// backend, or the data directory cannot be created.
pub fn open(data_dir: Option<PathBuf>) -> Result<Arc<dyn KeyValueStorage>, OpenError> {
    dotenvy::dotenv().ok();

    let mut config = StorageConfig::from_env()?;
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }
    if config.backend == BackendType::Memory {
        return Err(OpenError::MemoryBackend);
    }

    tracing::info!(data_dir = %config.data_dir.display(), "Opening store");
    Ok(open_storage(&config)?)
}

/// Write `text` and a newline to standard output.
///
/// # Errors
///
/// Returns the I/O error if stdout is closed.
pub fn write_stdout(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")
}
