//! Account management commands.
//!
//! # Usage
//!
//! ```bash
//! portal-cli account create -e jane@example.com -f Jane -l Doe -p secret1 -r admin
//! ```

use staff_portal::persistence::{PersistenceError, StoreRepository};
use staff_portal::services::MIN_PASSWORD_LENGTH;
use staff_portal::storage::KeyValueStorage;
use staff_portal_core::{Account, Email, EmailError, Role};
use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: user, admin")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A name is blank.
    #[error("First and last name are required")]
    MissingName,

    /// Password below the minimum length.
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// Account already exists.
    #[error("Account already exists with email: {0}")]
    AccountExists(Email),

    /// Reading or writing the store failed.
    #[error("{0}")]
    Persistence(#[from] PersistenceError),
}

/// Arguments of `account create`.
#[derive(Debug, Clone, Copy)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
    pub role: &'a str,
}

/// Create a verified account.
///
/// # Errors
///
/// Returns `AccountError` if an argument is invalid, the email is taken, or
/// the store cannot be read or written.
pub fn create(storage: &dyn KeyValueStorage, new: &NewAccount<'_>) -> Result<Account, AccountError> {
    let role: Role = new
        .role
        .parse()
        .map_err(|_| AccountError::InvalidRole(new.role.to_owned()))?;
    let email = Email::parse(new.email.trim())?;
    let first_name = new.first_name.trim();
    let last_name = new.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(AccountError::MissingName);
    }
    if new.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AccountError::PasswordTooShort);
    }

    let repository = StoreRepository::new(storage);
    let (mut store, _) = repository.load()?;
    if store.has_account(&email) {
        return Err(AccountError::AccountExists(email));
    }

    let account = Account {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email,
        password: new.password.to_owned(),
        role,
        verified: true,
    };
    store.accounts.push(account.clone());
    repository.save(&store)?;

    tracing::info!(email = %account.email, role = %account.role, "Account created");
    Ok(account)
}
