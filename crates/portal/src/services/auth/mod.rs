//! Authentication service.
//!
//! Registration, simulated email verification, login, logout and profile
//! edits. Credentials are compared in plaintext.

mod error;

pub use error::AuthError;

use staff_portal_core::{Account, Email, Role};

use crate::context::PortalContext;
use crate::persistence::keys;
use crate::services::{MIN_PASSWORD_LENGTH, required};

/// Data submitted on the registration form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: String,
}

/// Outcome of the simulated verification step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The pending account is now verified.
    Verified(Email),
    /// No registration was waiting.
    NothingPending,
}

/// Authentication service.
pub struct AuthService<'a> {
    ctx: &'a mut PortalContext,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(ctx: &'a mut PortalContext) -> Self {
        Self { ctx }
    }

    /// Register an unverified user and remember it as pending verification.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DuplicateEmail` if the email is taken,
    /// `AuthError::WeakPassword` for a short password,
    /// `AuthError::MissingField` for a blank name, or a persistence error.
    pub fn register(&mut self, registration: Registration) -> Result<Account, AuthError> {
        if self.ctx.store().has_account(&registration.email) {
            return Err(AuthError::DuplicateEmail);
        }

        let first_name =
            required(&registration.first_name).ok_or(AuthError::MissingField("first name"))?;
        let last_name =
            required(&registration.last_name).ok_or(AuthError::MissingField("last name"))?;
        validate_password(&registration.password)?;

        let account = Account {
            first_name,
            last_name,
            email: registration.email,
            password: registration.password,
            role: Role::User,
            verified: false,
        };

        let created = account.clone();
        self.ctx.mutate(move |store| {
            store.accounts.push(account);
            Ok::<_, AuthError>(())
        })?;
        self.ctx
            .storage()
            .set(keys::UNVERIFIED_EMAIL, created.email.as_str())?;

        tracing::info!(email = %created.email, "Account registered, awaiting verification");
        Ok(created)
    }

    /// Mark the pending account as verified and clear the pending slot.
    ///
    /// # Errors
    ///
    /// Returns a persistence or storage error if the change cannot be saved.
    pub fn verify_pending(&mut self) -> Result<Verification, AuthError> {
        let Some(email) = self.ctx.pending_verification()? else {
            return Ok(Verification::NothingPending);
        };

        if !self.ctx.store().has_account(&email) {
            tracing::warn!(%email, "Pending verification for missing account");
            self.ctx.storage().remove(keys::UNVERIFIED_EMAIL)?;
            return Ok(Verification::NothingPending);
        }

        self.ctx.mutate(|store| {
            if let Some(account) = store.account_mut(&email) {
                account.verified = true;
            }
            Ok::<_, AuthError>(())
        })?;
        self.ctx.storage().remove(keys::UNVERIFIED_EMAIL)?;

        tracing::info!(%email, "Email verified");
        Ok(Verification::Verified(email))
    }

    /// Log in with an exact email and password match.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no account matches and
    /// `AuthError::Unverified` if the matching account is not verified.
    pub fn login(&mut self, email: &Email, password: &str) -> Result<Account, AuthError> {
        let account = self
            .ctx
            .store()
            .accounts
            .iter()
            .find(|a| a.matches_credentials(email, password))
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.verified {
            return Err(AuthError::Unverified);
        }

        let account = account.clone();
        self.ctx.begin_session(&account.email)?;
        tracing::info!(email = %account.email, role = %account.role, "Login succeeded");
        Ok(account)
    }

    /// End the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session token cannot be removed.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if let Some(email) = self.ctx.session().email() {
            tracing::info!(%email, "Logout");
        }
        self.ctx.end_session()?;
        Ok(())
    }

    /// Change the session account's first and last name.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` without a session,
    /// `AuthError::MissingField` for a blank name, or a persistence error.
    pub fn update_profile(&mut self, first_name: &str, last_name: &str) -> Result<Account, AuthError> {
        let email = self
            .ctx
            .session()
            .email()
            .cloned()
            .ok_or(AuthError::NotAuthenticated)?;
        let first_name = required(first_name).ok_or(AuthError::MissingField("first name"))?;
        let last_name = required(last_name).ok_or(AuthError::MissingField("last name"))?;

        self.ctx.mutate(|store| {
            let account = store.account_mut(&email).ok_or(AuthError::NotAuthenticated)?;
            account.first_name = first_name;
            account.last_name = last_name;
            Ok(account.clone())
        })
    }
}

/// Validate password length.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
