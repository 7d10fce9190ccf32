//! Session state.
//!
//! There is one session slot. It points at an account by email and is
//! persisted at [`keys::AUTH_TOKEN`] so it survives a restart. The pointer is
//! only meaningful while the account exists: [`Session::reconcile`] drops a
//! stale token on load, and the context re-validates the session after every
//! store mutation.

use staff_portal_core::{Account, Email, Store};

use crate::persistence::keys;
use crate::storage::{KeyValueStorage, StorageError};

/// Requested authentication state, passed to [`Session::set_auth_state`].
#[derive(Debug, Clone, Copy)]
pub enum AuthState<'a> {
    Authenticated(&'a Account),
    Anonymous,
}

/// What the page chrome shows for the current session.
///
/// Only [`Session::set_auth_state`] writes these, so they always agree with
/// the session pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affordances {
    /// Show logged-in navigation (profile, requests, logout).
    pub authenticated: bool,
    /// Show admin navigation (employees, accounts, departments).
    pub is_admin: bool,
    /// Name shown in the navigation bar.
    pub display_name: Option<String>,
}

/// The current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    email: Option<Email>,
    affordances: Affordances,
}

impl Session {
    /// Rebuild the session from the persisted token.
    ///
    /// A token naming an account that no longer exists is removed from
    /// storage and the session starts anonymous.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the token cannot be read or removed.
    pub fn reconcile(store: &Store, storage: &dyn KeyValueStorage) -> Result<Self, StorageError> {
        let mut session = Self::default();

        let Some(token) = storage.get(keys::AUTH_TOKEN)? else {
            return Ok(session);
        };

        match Email::parse(&token).ok().and_then(|email| store.account(&email)) {
            Some(account) => {
                tracing::debug!(email = %account.email, "Session restored");
                session.set_auth_state(AuthState::Authenticated(account));
            }
            None => {
                tracing::info!("Discarding stale session token");
                storage.remove(keys::AUTH_TOKEN)?;
            }
        }

        Ok(session)
    }

    /// Point the session at an account, or clear it.
    ///
    /// This is the only way the session changes; it also recomputes the
    /// [`Affordances`].
    pub fn set_auth_state(&mut self, state: AuthState<'_>) {
        match state {
            AuthState::Authenticated(account) => {
                self.email = Some(account.email.clone());
                self.affordances = Affordances {
                    authenticated: true,
                    is_admin: account.is_admin(),
                    display_name: Some(account.first_name.clone()),
                };
            }
            AuthState::Anonymous => {
                self.email = None;
                self.affordances = Affordances::default();
            }
        }
    }

    /// Email of the session account, if logged in.
    #[must_use]
    pub const fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// Resolve the session pointer against `store`.
    #[must_use]
    pub fn account<'s>(&self, store: &'s Store) -> Option<&'s Account> {
        self.email.as_ref().and_then(|email| store.account(email))
    }

    #[must_use]
    pub const fn affordances(&self) -> &Affordances {
        &self.affordances
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.email.is_some()
    }
}
