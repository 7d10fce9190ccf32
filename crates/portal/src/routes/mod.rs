//! HTTP route handlers for the portal.
//!
//! Every view is served at its own path. `GET` resolves the path through the
//! view router (guards included) and renders the result; `POST` on the same
//! paths submits that view's form and answers with a 303 redirect carrying a
//! notice code.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Home
//! GET  /health                        - Liveness
//! GET  /health/ready                  - Storage reachable
//!
//! # Auth
//! GET  /login                         - Login page
//! POST /login                         - Login action
//! GET  /register                      - Register page
//! POST /register                      - Register action
//! GET  /verify-email                  - Simulated verification page
//! POST /verify-email                  - Verify the pending registration
//! POST /logout                        - Logout action
//!
//! # Session (requires login)
//! GET  /profile                       - Profile
//! POST /profile                       - Update first and last name
//! GET  /requests                      - Own requests (all requests for admins)
//! POST /requests                      - Submit a supply request
//! POST /requests/{id}/status          - Approve or reject (admin)
//!
//! # Admin
//! GET  /accounts                      - Account list and form (?edit=email)
//! POST /accounts                      - Create or edit an account
//! POST /accounts/{email}/password     - Reset password
//! POST /accounts/{email}/delete       - Delete account
//! GET  /employees                     - Employee list and form (?edit=id)
//! POST /employees                     - Create or edit an employee
//! POST /employees/{id}/delete         - Delete employee
//! GET  /departments                   - Department list and form (?edit=id)
//! POST /departments                   - Create or edit a department
//! POST /departments/{id}/delete       - Delete department
//!
//! *                                   - Not found page (404)
//! ```

pub mod admin;
pub mod auth;
pub mod health;
pub mod pages;
pub mod profile;
pub mod requests;

use axum::{
    Router,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::error::{AppError, Result};
use crate::notice::Notice;
use crate::router::{Transition, View};
use crate::services::UserFacing;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(pages::show).post(auth::login))
        .route("/register", get(pages::show).post(auth::register))
        .route("/verify-email", get(pages::show).post(auth::verify_email))
        .route("/logout", post(auth::logout))
}

/// Create the routes for logged-in accounts.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(pages::show).post(profile::update_profile))
        .route("/requests", get(pages::show).post(requests::submit_request))
        .route("/requests/{id}/status", post(requests::set_request_status))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(pages::show).post(admin::save_account))
        .route("/accounts/{email}/password", post(admin::reset_password))
        .route("/accounts/{email}/delete", post(admin::delete_account))
        .route("/employees", get(pages::show).post(admin::save_employee))
        .route("/employees/{id}/delete", post(admin::delete_employee))
        .route("/departments", get(pages::show).post(admin::save_department))
        .route("/departments/{id}/delete", post(admin::delete_department))
}

/// Create all routes for the portal.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::show))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(auth_routes())
        .merge(session_routes())
        .merge(admin_routes())
        .fallback(pages::show)
}

// =============================================================================
// Redirect helpers
// =============================================================================

/// 303 redirect to `view`, with the notice code in the query string.
#[must_use]
pub fn see_other(view: View, notice: Option<Notice>) -> Redirect {
    match notice {
        Some(notice) => Redirect::to(&format!("{}?notice={}", view.path(), notice.code())),
        None => Redirect::to(view.path()),
    }
}

/// Turn a routing transition into a response.
#[must_use]
pub fn follow(transition: Transition) -> Response {
    match transition {
        Transition::Redirect { to, notice } => see_other(to, notice).into_response(),
        Transition::Activate(view) => see_other(view, None).into_response(),
    }
}

/// Finish a form submission.
///
/// Success redirects wherever `on_success` says. Errors the user can fix
/// redirect back to `failure` with their notice; anything else becomes an
/// [`AppError`].
///
/// # Errors
///
/// Returns the service error when it has no user-facing notice.
pub fn settle<T, E>(
    result: std::result::Result<T, E>,
    failure: View,
    on_success: impl FnOnce(T) -> Redirect,
) -> Result<Redirect>
where
    E: UserFacing + std::fmt::Display + Into<AppError>,
{
    match result {
        Ok(value) => Ok(on_success(value)),
        Err(err) => match err.notice() {
            Some(notice) => {
                tracing::debug!(error = %err, view = %failure, "Form rejected");
                Ok(see_other(failure, Some(notice)))
            }
            None => Err(err.into()),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{StatusCode, header::LOCATION};

    use super::*;
    use crate::persistence::PersistenceError;
    use crate::services::requests::RequestError;
    use crate::storage::StorageError;

    fn location(redirect: Redirect) -> String {
        let response = redirect.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        response.headers()[LOCATION].to_str().unwrap().to_owned()
    }

    #[test]
    fn test_see_other_carries_notice_code() {
        assert_eq!(location(see_other(View::Home, None)), "/");
        assert_eq!(
            location(see_other(View::Home, Some(Notice::AdminsOnly))),
            "/?notice=access-denied"
        );
        assert_eq!(
            location(see_other(View::Accounts, Some(Notice::AccountSaved))),
            "/accounts?notice=account-saved"
        );
    }

    #[test]
    fn test_settle_success() {
        let result: std::result::Result<u8, RequestError> = Ok(1);
        let redirect = settle(result, View::Requests, |_| {
            see_other(View::Requests, Some(Notice::RequestSubmitted))
        })
        .unwrap();
        assert_eq!(location(redirect), "/requests?notice=request-submitted");
    }

    #[test]
    fn test_settle_user_error_redirects_back() {
        let result: std::result::Result<u8, RequestError> = Err(RequestError::Empty);
        let redirect = settle(result, View::Requests, |_| see_other(View::Home, None)).unwrap();
        assert_eq!(location(redirect), "/requests?notice=request-empty");
    }

    #[test]
    fn test_settle_server_error_propagates() {
        let result: std::result::Result<u8, RequestError> = Err(RequestError::Persistence(
            PersistenceError::Storage(StorageError::Poisoned),
        ));
        let err = settle(result, View::Requests, |_| see_other(View::Home, None)).unwrap_err();
        assert!(matches!(err, AppError::Request(_)));
    }
}
