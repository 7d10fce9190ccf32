//! Reading and writing the [`Store`] document.
//!
//! The whole aggregate is one JSON document at [`keys::STORE`]. Loading
//! falls back to the legacy keys written by older builds, then to the seed
//! data, and writes the result back so the next load finds it at the
//! current key.

use staff_portal_core::{SchemaError, Store, migrate};
use thiserror::Error;

use crate::storage::{KeyValueStorage, StorageError};

/// Well-known storage keys.
pub mod keys {
    /// The persisted store document.
    pub const STORE: &str = "portal.store";

    /// Email of the logged-in account.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Email waiting for (simulated) verification.
    pub const UNVERIFIED_EMAIL: &str = "unverified_email";

    /// Keys used by earlier builds, newest first.
    pub const LEGACY_STORE: [&str; 3] = [
        "ipt_demo_final_v3",
        "ipt_demo_final_v2",
        "ipt_demo_final_v1",
    ];
}

/// Errors that can occur while loading or saving persisted state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("stored document at '{key}' is not valid JSON: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored document at '{key}' cannot be migrated: {source}")]
    Schema {
        key: &'static str,
        #[source]
        source: SchemaError,
    },

    #[error("failed to serialize store: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Where a loaded store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// The current key held a document.
    Existing,
    /// Imported from a legacy key.
    Legacy(&'static str),
    /// Nothing was stored; seed data was written.
    Seeded,
}

/// Repository for the store document.
pub struct StoreRepository<'a> {
    storage: &'a dyn KeyValueStorage,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStorage) -> Self {
        Self { storage }
    }

    /// Load the store, importing legacy data or seeding if nothing is stored.
    ///
    /// Imported and seeded stores are saved at the current key before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if storage fails, or if a stored document
    /// is not JSON or cannot be migrated.
    pub fn load(&self) -> Result<(Store, LoadSource), PersistenceError> {
        if let Some(store) = self.read(keys::STORE)? {
            return Ok((store, LoadSource::Existing));
        }

        for key in keys::LEGACY_STORE {
            if let Some(store) = self.read(key)? {
                tracing::info!(legacy_key = key, "Importing store from legacy key");
                self.save(&store)?;
                return Ok((store, LoadSource::Legacy(key)));
            }
        }

        tracing::info!("No stored state found, seeding defaults");
        let store = Store::seeded();
        self.save(&store)?;
        Ok((store, LoadSource::Seeded))
    }

    /// Serialize `store` and write it at the current key.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if serialization or the write fails.
    pub fn save(&self, store: &Store) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(store).map_err(PersistenceError::Serialize)?;
        self.storage.set(keys::STORE, &json)?;
        Ok(())
    }

    /// Read the raw document at the current key, without migrating it.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if storage fails or the value is not JSON.
    pub fn read_raw(&self) -> Result<Option<serde_json::Value>, PersistenceError> {
        self.storage
            .get(keys::STORE)?
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|source| PersistenceError::Corrupt {
                    key: keys::STORE,
                    source,
                })
            })
            .transpose()
    }

    fn read(&self, key: &'static str) -> Result<Option<Store>, PersistenceError> {
        let Some(raw) = self.storage.get(key)? else {
            return Ok(None);
        };
        let document: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|source| PersistenceError::Corrupt { key, source })?;
        let store = migrate(document).map_err(|source| PersistenceError::Schema { key, source })?;
        Ok(Some(store))
    }
}
