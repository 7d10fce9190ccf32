//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::PortalConfig;
use crate::context::PortalContext;
use crate::error::AppError;
use crate::persistence::PersistenceError;
use crate::storage::{KeyValueStorage, open_storage};
use crate::views::RendererRegistry;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The portal context sits behind one mutex:
/// a handler locks it, runs its read-mutate-save sequence without awaiting,
/// and releases it, so there is only ever one writer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PortalConfig,
    context: Mutex<PortalContext>,
    renderers: RendererRegistry,
}

impl AppState {
    /// Open the configured storage and load the portal.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the storage cannot be opened or the
    /// stored state cannot be loaded.
    pub fn new(config: PortalConfig) -> Result<Self, PersistenceError> {
        let storage = open_storage(&config.storage)?;
        Self::with_storage(config, storage)
    }

    /// Load the portal from an already opened storage.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the stored state cannot be loaded.
    pub fn with_storage(
        config: PortalConfig,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Result<Self, PersistenceError> {
        let context = PortalContext::open(storage)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                context: Mutex::new(context),
                renderers: RendererRegistry::standard(),
            }),
        })
    }

    /// Get a reference to the portal configuration.
    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// Lock the portal context.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous holder panicked.
    pub fn context(&self) -> Result<MutexGuard<'_, PortalContext>, AppError> {
        self.inner
            .context
            .lock()
            .map_err(|_| AppError::Internal("portal context lock poisoned".to_string()))
    }

    /// The view renderers, bound once at startup.
    #[must_use]
    pub fn renderers(&self) -> &RendererRegistry {
        &self.inner.renderers
    }
}
