//! Supply requests page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect, Response};
use staff_portal_core::{RequestStatus, SupplyRequest};

use super::{Layout, RenderContext};
use crate::filters;
use crate::router::View;

/// Options offered in the request type select.
const REQUEST_TYPES: [&str; 4] = ["Equipment", "Office Supplies", "Software", "Other"];

/// Empty item rows on the submission form.
const ITEM_SLOTS: [u8; 5] = [1, 2, 3, 4, 5];

/// One table row.
#[derive(Debug, Clone)]
pub struct RequestRow {
    pub id: String,
    pub date: String,
    pub request_type: String,
    pub summary: String,
    pub status: &'static str,
    pub status_class: &'static str,
    pub employee_email: String,
    pub pending: bool,
}

impl From<&SupplyRequest> for RequestRow {
    fn from(request: &SupplyRequest) -> Self {
        Self {
            id: request.id.to_string(),
            date: request.date.clone(),
            request_type: request.request_type.clone(),
            summary: request.items_summary(),
            status: request.status.as_str(),
            status_class: match request.status {
                RequestStatus::Pending => "badge-warning",
                RequestStatus::Approved => "badge-success",
                RequestStatus::Rejected => "badge-danger",
            },
            employee_email: request.employee_email.to_string(),
            pending: request.status == RequestStatus::Pending,
        }
    }
}

/// Requests page template.
#[derive(Template, WebTemplate)]
#[template(path = "requests.html")]
pub struct RequestsTemplate {
    pub layout: Layout,
    /// The session account's own requests.
    pub mine: Vec<RequestRow>,
    /// Every request, for administrators.
    pub all: Option<Vec<RequestRow>>,
    pub request_types: [&'static str; 4],
    pub item_slots: [u8; 5],
}

pub fn render(ctx: &RenderContext<'_>) -> Response {
    let Some(account) = ctx.portal.current_account() else {
        return Redirect::to(View::Login.path()).into_response();
    };
    let store = ctx.portal.store();

    let mine = store.requests_from(&account.email).map(RequestRow::from).collect();
    let all = account
        .is_admin()
        .then(|| store.requests.iter().map(RequestRow::from).collect());

    RequestsTemplate {
        layout: ctx.layout(),
        mine,
        all,
        request_types: REQUEST_TYPES,
        item_slots: ITEM_SLOTS,
    }
    .into_response()
}
