//! Integration tests for Staff Portal.
//!
//! The portal is driven in-process: each request goes through the full axum
//! router with `tower::ServiceExt::oneshot`, no listener involved.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p staff-portal-integration-tests
//! ```
//!
//! # Reloads
//!
//! [`TestContext::reload`] builds a brand new application over the same
//! memory storage, the way restarting the portal rebuilds its context from
//! what was persisted.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use staff_portal::config::PortalConfig;
use staff_portal::persistence::StoreRepository;
use staff_portal::state::AppState;
use staff_portal::storage::{KeyValueStorage, MemoryStorage};
use staff_portal_core::Store;
use tower::ServiceExt;

/// A portal application over an inspectable storage.
pub struct TestContext {
    storage: Arc<MemoryStorage>,
    app: Router,
}

/// The parts of a response the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// `Location` header of a redirect.
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Assert a 303 redirect and return its target.
    ///
    /// # Panics
    ///
    /// Panics if the response is not a 303 with a `Location` header.
    #[must_use]
    pub fn redirect_target(&self) -> &str {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        self.location.as_deref().expect("redirect without Location")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// A portal over empty storage, so the seed data is written.
    ///
    /// # Panics
    ///
    /// Panics if the portal cannot be loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new()))
    }

    /// A portal over `storage`.
    ///
    /// # Panics
    ///
    /// Panics if the stored state cannot be loaded.
    #[must_use]
    pub fn with_storage(storage: Arc<MemoryStorage>) -> Self {
        let shared: Arc<dyn KeyValueStorage> = storage.clone();
        let state = AppState::with_storage(PortalConfig::default(), shared)
            .expect("Failed to load portal state");
        Self {
            storage,
            app: staff_portal::app(state),
        }
    }

    /// A new application over the same storage.
    #[must_use]
    pub fn reload(&self) -> Self {
        Self::with_storage(Arc::clone(&self.storage))
    }

    /// The raw storage backend.
    #[must_use]
    pub fn storage(&self) -> &MemoryStorage {
        &self.storage
    }

    /// The store as currently persisted.
    ///
    /// # Panics
    ///
    /// Panics if the stored document cannot be loaded.
    #[must_use]
    pub fn persisted_store(&self) -> Store {
        StoreRepository::new(self.storage.as_ref())
            .load()
            .expect("Failed to load persisted store")
            .0
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Send a form POST request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn post(&self, uri: &str, form: &[(&str, &str)]) -> TestResponse {
        let body = form
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Log in and assert it succeeded.
    ///
    /// # Panics
    ///
    /// Panics if the login does not redirect to the profile page.
    pub async fn login(&self, email: &str, password: &str) {
        let response = self
            .post("/login", &[("email", email), ("password", password)])
            .await;
        assert_eq!(response.redirect_target(), "/profile");
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
