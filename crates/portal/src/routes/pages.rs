//! Page handler shared by every view path.

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::Result;
use crate::notice::Notice;
use crate::router::{self, Transition, View};
use crate::routes::follow;
use crate::state::AppState;
use crate::views::RenderContext;

/// Query parameters accepted by every page.
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    /// One-shot notice code.
    pub notice: Option<String>,
    /// Key of the record to load into the edit form.
    pub edit: Option<String>,
}

/// Resolve the request path through the view router and render the result.
///
/// Unknown notice codes are ignored. Unknown paths render the not-found view
/// with a 404 status.
pub async fn show(
    State(state): State<AppState>,
    uri: Uri,
    Query(query): Query<ViewQuery>,
) -> Result<Response> {
    let notice = query
        .notice
        .as_deref()
        .and_then(|code| code.parse::<Notice>().ok());

    let ctx = state.context()?;
    let view = match router::resolve(uri.path(), ctx.current_account()) {
        Transition::Activate(view) => view,
        redirect @ Transition::Redirect { .. } => return Ok(follow(redirect)),
    };

    let pending_email = if view == View::VerifyEmail {
        ctx.pending_verification()?
    } else {
        None
    };

    let render = RenderContext {
        portal: &ctx,
        view,
        notice,
        edit: query.edit.as_deref(),
        pending_email,
    };
    let response = state.renderers().render(&render);

    if view == View::NotFound {
        return Ok((StatusCode::NOT_FOUND, response).into_response());
    }
    Ok(response)
}
