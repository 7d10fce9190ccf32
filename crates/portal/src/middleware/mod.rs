//! HTTP middleware and extractors for the portal.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors, added in `main`)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers (CSP, frame denial, no caching)
//!
//! Route guards are extractors rather than layers: a handler that names
//! [`RequireSession`] or [`RequireAdmin`] runs only when the guard passes.

pub mod auth;
pub mod security_headers;

pub use auth::{GuardRejection, RequireAdmin, RequireSession};
pub use security_headers::security_headers_middleware;
