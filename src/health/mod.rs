//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Liveness endpoint (this module):
//!     GET /health → constant HealthStatus, no side effects
//!
//! Probe client (probe.rs):
//!     healthcheck binary → GET {url}/health → exit status
//! ```
//!
//! # Design Decisions
//! - Liveness only: the handler touches no dependencies, so it answers as
//!   long as the process can serve HTTP
//! - Query string and headers are ignored

pub mod probe;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;

/// Value of `status` in a healthy response.
pub const STATUS_OK: &str = "ok";

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub env: String,
    pub version: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: STATUS_OK.to_string(),
        service: state.service.name.clone(),
        env: state.service.env.clone(),
        version: state.service.version.to_string(),
    })
}
