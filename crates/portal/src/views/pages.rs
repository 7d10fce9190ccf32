//! Pages without store data.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use super::{Layout, RenderContext};
use crate::filters;
use crate::router::View;
use crate::services::MIN_PASSWORD_LENGTH;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    pub min_password_length: usize,
}

/// Verify email page template.
#[derive(Template, WebTemplate)]
#[template(path = "verify_email.html")]
pub struct VerifyEmailTemplate {
    pub layout: Layout,
    pub pending_email: Option<String>,
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

/// Heading only, for a data view with no renderer bound.
#[derive(Template, WebTemplate)]
#[template(path = "blank.html")]
pub struct BlankTemplate {
    pub layout: Layout,
}

pub fn render_static(ctx: &RenderContext<'_>) -> Response {
    let layout = ctx.layout();
    match ctx.view {
        View::Home => HomeTemplate { layout }.into_response(),
        View::Login => LoginTemplate { layout }.into_response(),
        View::Register => RegisterTemplate {
            layout,
            min_password_length: MIN_PASSWORD_LENGTH,
        }
        .into_response(),
        View::VerifyEmail => VerifyEmailTemplate {
            layout,
            pending_email: ctx.pending_email.as_ref().map(ToString::to_string),
        }
        .into_response(),
        View::NotFound => NotFoundTemplate { layout }.into_response(),
        View::Profile | View::Requests | View::Employees | View::Accounts | View::Departments => {
            BlankTemplate { layout }.into_response()
        }
    }
}
