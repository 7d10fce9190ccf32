//! Staff Portal library.
//!
//! The web application as a library: the binary in `main.rs` only adds
//! configuration, logging, Sentry and the listener, so the whole request
//! path can be driven in-process from tests.
//!
//! # Layers
//!
//! - [`storage`] - string key-value backends (file, memory)
//! - [`persistence`] - the store document on top of storage, with migration
//! - [`session`] / [`context`] - the session pointer and the single-writer context
//! - [`router`] - view names, access levels and guards
//! - [`services`] - auth, admin and request operations
//! - [`views`] / [`routes`] - askama pages and the axum handlers serving them

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod context;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod notice;
pub mod persistence;
pub mod router;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;
pub mod views;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Directory holding the stylesheet served under `/static`.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the application router with its middleware and state.
///
/// Sentry layers are not included; `main` wraps them around the result.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::PortalConfig;
    use crate::storage::MemoryStorage;

    fn test_app() -> Router {
        let state =
            AppState::with_storage(PortalConfig::default(), Arc::new(MemoryStorage::new()))
                .unwrap();
        app(state)
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = get(test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_readiness() {
        let response = get(test_app(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_home_has_security_headers() {
        let response = get(test_app(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found_page() {
        let response = get(test_app(), "/nowhere").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Page Not Found"));
    }

    #[tokio::test]
    async fn test_trailing_slash_resolves_to_view() {
        let response = get(test_app(), "/login/").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stylesheet_is_served() {
        let response = get(test_app(), "/static/portal.css").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
