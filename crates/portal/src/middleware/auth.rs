//! Session guard extractors.
//!
//! Both extractors lock the portal context, look up the session account and
//! run it through [`router::guard`], so form handlers enforce exactly the
//! access rules the page routes do.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use staff_portal_core::Account;

use crate::error::AppError;
use crate::router::{self, Access, Transition};
use crate::routes::follow;
use crate::state::AppState;

/// Extractor that requires a logged-in account.
///
/// Anonymous requests are redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireSession(account): RequireSession) -> impl IntoResponse {
///     format!("Hello, {}!", account.first_name)
/// }
/// ```
pub struct RequireSession(pub Account);

/// Extractor that requires a logged-in administrator.
///
/// Anonymous requests go to the login page; other accounts go home with the
/// admins-only notice.
pub struct RequireAdmin(pub Account);

/// Why a guard refused the request.
#[derive(Debug)]
pub enum GuardRejection {
    /// The guard failed; perform this redirect.
    Redirect(Transition),
    /// The portal context could not be read.
    Internal(AppError),
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(transition) => follow(transition).into_response(),
            Self::Internal(err) => err.into_response(),
        }
    }
}

/// Run the guard for `access` against the current session account.
fn guarded_account(state: &AppState, access: Access) -> Result<Account, GuardRejection> {
    let ctx = state.context().map_err(GuardRejection::Internal)?;
    let account = ctx.current_account();
    router::guard(access, account).map_err(GuardRejection::Redirect)?;

    // A passing protected guard always has an account
    account.cloned().ok_or(GuardRejection::Redirect(Transition::Redirect {
        to: router::View::Login,
        notice: None,
    }))
}

impl<S> FromRequestParts<S> for RequireSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        guarded_account(&state, Access::Protected).map(Self)
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        guarded_account(&state, Access::Admin).map(Self)
    }
}
