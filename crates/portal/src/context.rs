//! The portal's single-writer application context.
//!
//! [`PortalContext`] owns the loaded [`Store`], the [`Session`] and the
//! storage handle. All reads and writes of portal state go through it, and
//! the whole context sits behind one mutex in [`AppState`](crate::state::AppState).

use std::sync::Arc;

use staff_portal_core::{Account, Email, Store};

use crate::persistence::{LoadSource, PersistenceError, StoreRepository, keys};
use crate::session::{AuthState, Session};
use crate::storage::{KeyValueStorage, StorageError};

pub struct PortalContext {
    storage: Arc<dyn KeyValueStorage>,
    store: Store,
    session: Session,
}

impl std::fmt::Debug for PortalContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalContext")
            .field("store", &self.store)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl PortalContext {
    /// Load the store and reconcile the session from `storage`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the stored state cannot be read or the
    /// seed data cannot be written.
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Result<Self, PersistenceError> {
        let (store, source) = StoreRepository::new(storage.as_ref()).load()?;
        match source {
            LoadSource::Existing => {}
            LoadSource::Legacy(key) => tracing::info!(legacy_key = key, "Imported legacy store"),
            LoadSource::Seeded => tracing::info!("Seeded default store"),
        }

        let session = Session::reconcile(&store, storage.as_ref())?;

        Ok(Self {
            storage,
            store,
            session,
        })
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The account the session points at.
    #[must_use]
    pub fn current_account(&self) -> Option<&Account> {
        self.session.account(&self.store)
    }

    /// Email waiting for (simulated) verification, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the pending slot cannot be read.
    pub fn pending_verification(&self) -> Result<Option<Email>, StorageError> {
        Ok(self
            .storage
            .get(keys::UNVERIFIED_EMAIL)?
            .and_then(|raw| Email::parse(&raw).ok()))
    }

    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    /// Apply `change` to a copy of the store, save the copy, then adopt it.
    ///
    /// If `change` fails nothing is saved; if the save fails the in-memory
    /// store is left as it was. After a successful save the session is
    /// re-validated against the new store. The change stands even when the
    /// session token cannot be rewritten; that failure is only logged.
    ///
    /// # Errors
    ///
    /// Returns the error from `change`, or a persistence error converted
    /// into `E`.
    pub fn mutate<T, E>(&mut self, change: impl FnOnce(&mut Store) -> Result<T, E>) -> Result<T, E>
    where
        E: From<PersistenceError>,
    {
        self.commit(change, None)
    }

    /// Like [`mutate`](Self::mutate), for a change that moves an account from
    /// email `from` to `to`. A session pointing at `from` follows the account.
    ///
    /// # Errors
    ///
    /// Same as [`mutate`](Self::mutate).
    pub fn mutate_renaming<T, E>(
        &mut self,
        from: &Email,
        to: &Email,
        change: impl FnOnce(&mut Store) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<PersistenceError>,
    {
        self.commit(change, Some((from, to)))
    }

    fn commit<T, E>(
        &mut self,
        change: impl FnOnce(&mut Store) -> Result<T, E>,
        renamed: Option<(&Email, &Email)>,
    ) -> Result<T, E>
    where
        E: From<PersistenceError>,
    {
        let mut draft = self.store.clone();
        let output = change(&mut draft)?;

        StoreRepository::new(self.storage.as_ref()).save(&draft)?;
        self.store = draft;

        let token_update = match renamed {
            Some((from, to)) if from != to && self.session.email() == Some(from) => {
                tracing::info!(%from, %to, "Session follows renamed account");
                self.follow_session(to)
            }
            _ => self.revalidate_session(),
        };
        if let Err(error) = token_update {
            tracing::error!(%error, "Store saved but session token update failed");
        }

        Ok(output)
    }

    /// Log in as `email`: persist the token and point the session at it.
    ///
    /// Does nothing if no account has that email.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the token cannot be written.
    pub fn begin_session(&mut self, email: &Email) -> Result<(), StorageError> {
        let Some(account) = self.store.account(email) else {
            return Ok(());
        };
        self.storage.set(keys::AUTH_TOKEN, account.email.as_str())?;
        self.session.set_auth_state(AuthState::Authenticated(account));
        Ok(())
    }

    /// Log out: remove the token and clear the session.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the token cannot be removed.
    pub fn end_session(&mut self) -> Result<(), StorageError> {
        self.storage.remove(keys::AUTH_TOKEN)?;
        self.session.set_auth_state(AuthState::Anonymous);
        Ok(())
    }

    /// Refresh the session after a store change: follow edits to the
    /// session account, or log out if it was deleted.
    fn revalidate_session(&mut self) -> Result<(), StorageError> {
        let Some(email) = self.session.email().cloned() else {
            return Ok(());
        };

        if let Some(account) = self.store.account(&email) {
            self.session.set_auth_state(AuthState::Authenticated(account));
            Ok(())
        } else {
            tracing::info!(%email, "Session account removed, logging out");
            self.session.set_auth_state(AuthState::Anonymous);
            self.storage.remove(keys::AUTH_TOKEN)
        }
    }

    /// Point the session at the account now stored under `email`, then
    /// rewrite the token.
    fn follow_session(&mut self, email: &Email) -> Result<(), StorageError> {
        let Some(account) = self.store.account(email) else {
            self.session.set_auth_state(AuthState::Anonymous);
            return self.storage.remove(keys::AUTH_TOKEN);
        };
        self.session.set_auth_state(AuthState::Authenticated(account));
        self.storage.set(keys::AUTH_TOKEN, email.as_str())
    }
}
