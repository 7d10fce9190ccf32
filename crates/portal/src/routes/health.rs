//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::persistence::keys;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Reads the store key from the storage backend. Returns 503 Service
/// Unavailable if the backend cannot be read.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Ok(ctx) = state.context() else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };
    match ctx.storage().get(keys::STORE) {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
