//! Health endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/health.
#[derive(Serialize)]
pub(crate) struct HealthResponse {
    /// Always "ok" when the server answers at all.
    status: &'static str,
    /// Application version.
    version: String,
    /// Whether a generation upstream is configured.
    upstream: bool,
}

/// Handle GET /api/health.
pub(crate) async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.version.clone(),
        upstream: state.upstream_enabled(),
    })
}
