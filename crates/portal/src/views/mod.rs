//! Page rendering.
//!
//! Every view is an askama template extending `base.html`. Views that show
//! store data have a renderer bound in the [`RendererRegistry`]; the rest
//! are static pages.

mod admin;
mod pages;
mod profile;
mod requests;

use std::collections::HashMap;

use axum::response::Response;
use staff_portal_core::Email;

use crate::context::PortalContext;
use crate::notice::Notice;
use crate::router::View;
use crate::session::Affordances;

/// Read-only inputs to a renderer.
pub struct RenderContext<'a> {
    pub portal: &'a PortalContext,
    pub view: View,
    pub notice: Option<Notice>,
    /// Key of the record to prefill the edit form with (`?edit=`).
    pub edit: Option<&'a str>,
    /// Registration waiting for verification, for the verify-email page.
    pub pending_email: Option<Email>,
}

impl RenderContext<'_> {
    /// Page chrome for the current view and session.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout {
            title: self.view.title(),
            active: self.view.name(),
            affordances: self.portal.session().affordances().clone(),
            notice: self.notice,
        }
    }
}

/// Fields `base.html` reads.
#[derive(Debug, Clone)]
pub struct Layout {
    pub title: &'static str,
    pub active: &'static str,
    pub affordances: Affordances,
    pub notice: Option<Notice>,
}

/// Produces the page for one view.
pub type Renderer = fn(&RenderContext<'_>) -> Response;

/// Explicit binding of views to their data renderers.
#[derive(Debug, Clone, Default)]
pub struct RendererRegistry {
    renderers: HashMap<View, Renderer>,
}

impl RendererRegistry {
    /// Bind `renderer` to `view`, replacing any earlier binding.
    #[must_use]
    pub fn with(mut self, view: View, renderer: Renderer) -> Self {
        self.renderers.insert(view, renderer);
        self
    }

    /// The portal's renderers.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
            .with(View::Profile, profile::render)
            .with(View::Requests, requests::render)
            .with(View::Employees, admin::render_employees)
            .with(View::Accounts, admin::render_accounts)
            .with(View::Departments, admin::render_departments)
    }

    #[cfg(test)]
    fn has_renderer(&self, view: View) -> bool {
        self.renderers.contains_key(&view)
    }

    /// Render `ctx.view` with its bound renderer, or as a static page.
    #[must_use]
    pub fn render(&self, ctx: &RenderContext<'_>) -> Response {
        match self.renderers.get(&ctx.view) {
            Some(renderer) => renderer(ctx),
            None => pages::render_static(ctx),
        }
    }
}
