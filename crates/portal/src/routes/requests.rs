//! Supply request route handlers.

use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use staff_portal_core::{RequestId, RequestStatus};

use crate::error::{AppError, Result};
use crate::middleware::{RequireAdmin, RequireSession};
use crate::notice::Notice;
use crate::router::View;
use crate::routes::{see_other, settle};
use crate::services::requests::{ItemDraft, RequestService};
use crate::state::AppState;

/// Status form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Request type and item rows from the submitted form.
///
/// The form repeats `item_name` and `item_qty` once per row; they are paired
/// up in order. A name without a quantity gets an empty one, which the
/// service rejects.
fn parse_request_form(fields: Vec<(String, String)>) -> (String, Vec<ItemDraft>) {
    let mut request_type = String::new();
    let mut names = Vec::new();
    let mut qtys = Vec::new();

    for (key, value) in fields {
        match key.as_str() {
            "type" => request_type = value,
            "item_name" => names.push(value),
            "item_qty" => qtys.push(value),
            _ => {}
        }
    }

    let mut qtys = qtys.into_iter();
    let items = names
        .into_iter()
        .map(|name| ItemDraft {
            name,
            qty: qtys.next().unwrap_or_default(),
        })
        .collect();
    (request_type, items)
}

/// Submit a supply request for the session account.
pub async fn submit_request(
    State(state): State<AppState>,
    RequireSession(_account): RequireSession,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let (request_type, items) = parse_request_form(fields);

    let mut ctx = state.context()?;
    let result = RequestService::new(&mut ctx).submit(&request_type, items, chrono::Utc::now());
    settle(result, View::Requests, |_| {
        see_other(View::Requests, Some(Notice::RequestSubmitted))
    })
}

/// Approve or reject a request.
pub async fn set_request_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<RequestId>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    let status: RequestStatus = form.status.parse().map_err(AppError::BadRequest)?;

    let mut ctx = state.context()?;
    let result = RequestService::new(&mut ctx).set_status(id, status);
    settle(result, View::Requests, |_| {
        see_other(View::Requests, Some(Notice::RequestUpdated))
    })
}
