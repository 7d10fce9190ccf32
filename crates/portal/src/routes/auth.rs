//! Authentication route handlers.
//!
//! Handles login, registration, the simulated email verification and logout.
//! Every handler answers with a redirect; the page it lands on shows the
//! notice.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use staff_portal_core::Email;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::notice::Notice;
use crate::router::View;
use crate::routes::{see_other, settle};
use crate::services::auth::{AuthService, Registration, Verification};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle login form submission.
///
/// A malformed email gets the same generic notice as a wrong password.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Redirect> {
    let Ok(email) = Email::parse(form.email.trim()) else {
        return Ok(see_other(View::Login, Some(Notice::InvalidCredentials)));
    };

    let mut ctx = state.context()?;
    let result = AuthService::new(&mut ctx).login(&email, &form.password);
    settle(result, View::Login, |account| {
        set_sentry_user(account.email.as_str());
        see_other(View::Profile, None)
    })
}

/// Handle registration form submission.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect> {
    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(e) => {
            tracing::debug!(error = %e, "Registration with invalid email");
            return Ok(see_other(View::Register, Some(Notice::InvalidEmail)));
        }
    };

    let mut ctx = state.context()?;
    let result = AuthService::new(&mut ctx).register(Registration {
        first_name: form.first_name,
        last_name: form.last_name,
        email,
        password: form.password,
    });
    settle(result, View::Register, |_| {
        see_other(View::VerifyEmail, Some(Notice::VerificationSent))
    })
}

/// Verify the registration waiting in the pending slot.
pub async fn verify_email(State(state): State<AppState>) -> Result<Redirect> {
    let mut ctx = state.context()?;
    let result = AuthService::new(&mut ctx).verify_pending();
    settle(result, View::VerifyEmail, |outcome| match outcome {
        Verification::Verified(_) => see_other(View::Login, Some(Notice::EmailVerified)),
        Verification::NothingPending => see_other(View::Login, Some(Notice::NothingToVerify)),
    })
}

/// Handle logout.
pub async fn logout(State(state): State<AppState>) -> Result<Redirect> {
    let mut ctx = state.context()?;
    AuthService::new(&mut ctx).logout()?;
    clear_sentry_user();
    Ok(see_other(View::Home, Some(Notice::LoggedOut)))
}
