//! Profile route handlers.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::RequireSession;
use crate::notice::Notice;
use crate::router::View;
use crate::routes::{see_other, settle};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Profile form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
}

/// Update the session account's names.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireSession(account): RequireSession,
    Form(form): Form<ProfileForm>,
) -> Result<Redirect> {
    let mut ctx = state.context()?;
    let result = AuthService::new(&mut ctx).update_profile(&form.first_name, &form.last_name);
    settle(result, View::Profile, |updated| {
        tracing::info!(email = %account.email, name = %updated.full_name(), "Profile updated");
        see_other(View::Profile, Some(Notice::ProfileUpdated))
    })
}
