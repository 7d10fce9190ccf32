//! Authentication error types.

use thiserror::Error;

use crate::notice::Notice;
use crate::persistence::PersistenceError;
use crate::services::UserFacing;
use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] staff_portal_core::EmailError),

    /// Wrong email or password. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Credentials matched an account that has not verified its email.
    #[error("email not verified")]
    Unverified,

    /// An account with this email already exists.
    #[error("email already registered")]
    DuplicateEmail,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// A required field was blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The operation needs a logged-in session.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Saving the store failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Reading or writing a session key failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl UserFacing for AuthError {
    fn notice(&self) -> Option<Notice> {
        match self {
            Self::InvalidEmail(_) => Some(Notice::InvalidEmail),
            Self::InvalidCredentials | Self::NotAuthenticated => Some(Notice::InvalidCredentials),
            Self::Unverified => Some(Notice::PleaseVerify),
            Self::DuplicateEmail => Some(Notice::EmailExists),
            Self::WeakPassword(_) => Some(Notice::WeakPassword),
            Self::MissingField(_) => Some(Notice::MissingField),
            Self::Persistence(_) | Self::Storage(_) => None,
        }
    }
}
