//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. Route handlers return `Result<T, AppError>`.
//! Errors a user can fix normally never get here: handlers turn them into a
//! redirect with a notice first.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::persistence::PersistenceError;
use crate::services::UserFacing;
use crate::services::admin::AdminError;
use crate::services::auth::AuthError;
use crate::services::requests::RequestError;
use crate::storage::StorageError;

/// Application-level error type for the portal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Loading or saving the store failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// A storage backend operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Admin operation failed.
    #[error("Admin error: {0}")]
    Admin(#[from] AdminError),

    /// Request operation failed.
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the error is the server's fault.
    fn is_server_error(&self) -> bool {
        match self {
            Self::Persistence(_) | Self::Storage(_) | Self::Internal(_) => true,
            Self::Auth(err) => err.notice().is_none(),
            Self::Admin(err) => err.notice().is_none(),
            Self::Request(err) => err.notice().is_none(),
            Self::BadRequest(_) => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            _ if self.is_server_error() => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::NotAuthenticated => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::Unverified => StatusCode::FORBIDDEN,
                AuthError::DuplicateEmail => StatusCode::CONFLICT,
                _ => StatusCode::BAD_REQUEST,
            },
            Self::Admin(err) => match err {
                AdminError::Forbidden => StatusCode::FORBIDDEN,
                AdminError::NotFound(_) => StatusCode::NOT_FOUND,
                AdminError::DuplicateEmail(_) | AdminError::DuplicateEmployee(_) => {
                    StatusCode::CONFLICT
                }
                _ => StatusCode::BAD_REQUEST,
            },
            Self::Request(err) => match err {
                RequestError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                RequestError::Forbidden => StatusCode::FORBIDDEN,
                RequestError::NotFound(_) => StatusCode::NOT_FOUND,
                RequestError::InvalidTransition { .. } => StatusCode::CONFLICT,
                _ => StatusCode::BAD_REQUEST,
            },
            _ => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let notice = match &self {
            Self::Auth(err) => err.notice(),
            Self::Admin(err) => err.notice(),
            Self::Request(err) => err.notice(),
            _ => None,
        };
        let message = if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            notice.map_or_else(|| self.to_string(), |n| n.message().to_string())
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for the logged-in account.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(email.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid role".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid role");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Storage(StorageError::Poisoned)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Admin(AdminError::Forbidden)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Request(RequestError::Empty)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_wrapped_persistence_failure_is_server_error() {
        let err = AppError::Admin(AdminError::Persistence(PersistenceError::Storage(
            StorageError::Poisoned,
        )));
        assert_eq!(get_status(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
