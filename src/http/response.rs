//! Framework-level responses.
//!
//! Unmatched paths get a JSON 404 so clients can always parse the body.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Error body shape: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: &'static str,
}

/// Fallback for every unregistered route.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody { detail: "Not Found" }))
}
