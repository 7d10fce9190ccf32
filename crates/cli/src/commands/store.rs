//! Store document commands.
//!
//! # Usage
//!
//! ```bash
//! portal-cli store seed [--force]
//! portal-cli store migrate
//! portal-cli store export [--pretty]
//! ```

use serde_json::Value;
use staff_portal::persistence::{LoadSource, PersistenceError, StoreRepository};
use staff_portal::storage::KeyValueStorage;
use staff_portal_core::{CURRENT_VERSION, SchemaError, Store, migrate as migrate_document};
use thiserror::Error;

/// Errors that can occur during store commands.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A store already exists and `--force` was not given.
    #[error("A store already exists; pass --force to replace it")]
    AlreadySeeded,

    /// There is nothing to export.
    #[error("No store has been written yet")]
    NothingStored,

    /// Reading or writing the store failed.
    #[error("{0}")]
    Persistence(#[from] PersistenceError),

    /// The stored document cannot be upgraded.
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// The document cannot be printed.
    #[error("Failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write the seed data at the store key.
///
/// # Errors
///
/// Returns `StoreError::AlreadySeeded` if a store exists and `force` is
/// false, or a persistence error.
pub fn seed(storage: &dyn KeyValueStorage, force: bool) -> Result<(), StoreError> {
    let repository = StoreRepository::new(storage);
    if repository.read_raw()?.is_some() && !force {
        return Err(StoreError::AlreadySeeded);
    }

    let store = Store::seeded();
    repository.save(&store)?;
    tracing::info!(
        accounts = store.accounts.len(),
        departments = store.departments.len(),
        "Seed data written"
    );
    Ok(())
}

/// Upgrade the stored document to [`CURRENT_VERSION`].
///
/// Legacy keys are imported and an empty storage is seeded, the same way the
/// portal does at startup.
///
/// # Errors
///
/// Returns a persistence error if the document cannot be read, migrated or
/// written.
pub fn migrate(storage: &dyn KeyValueStorage) -> Result<(), StoreError> {
    let repository = StoreRepository::new(storage);
    let found = repository
        .read_raw()?
        .map(|doc| doc.get("version").and_then(Value::as_u64).unwrap_or(0));

    let (store, source) = repository.load()?;
    match source {
        LoadSource::Existing if found == Some(u64::from(CURRENT_VERSION)) => {
            tracing::info!(version = CURRENT_VERSION, "Store is already current");
        }
        LoadSource::Existing => {
            repository.save(&store)?;
            tracing::info!(from = ?found, to = CURRENT_VERSION, "Store migrated");
        }
        LoadSource::Legacy(key) => {
            tracing::info!(legacy_key = key, to = CURRENT_VERSION, "Legacy store imported");
        }
        LoadSource::Seeded => {
            tracing::info!("No store found; seed data written");
        }
    }
    Ok(())
}

/// The stored document, upgraded to the current schema, as JSON text.
///
/// Nothing is written back.
///
/// # Errors
///
/// Returns `StoreError::NothingStored` if no store exists, or an error if
/// the document cannot be read or migrated.
pub fn export(storage: &dyn KeyValueStorage, pretty: bool) -> Result<String, StoreError> {
    let document = StoreRepository::new(storage)
        .read_raw()?
        .ok_or(StoreError::NothingStored)?;
    let store = migrate_document(document)?;

    let json = if pretty {
        serde_json::to_string_pretty(&store)?
    } else {
        serde_json::to_string(&store)?
    };
    Ok(json)
}
