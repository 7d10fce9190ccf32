//! Profile page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect, Response};
use staff_portal_core::Account;

use super::{Layout, RenderContext};
use crate::filters;
use crate::router::View;

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub layout: Layout,
    pub account: Account,
}

pub fn render(ctx: &RenderContext<'_>) -> Response {
    // Guards run first, so a missing account means it vanished mid-request
    let Some(account) = ctx.portal.current_account() else {
        return Redirect::to(View::Login.path()).into_response();
    };

    ProfileTemplate {
        layout: ctx.layout(),
        account: account.clone(),
    }
    .into_response()
}
