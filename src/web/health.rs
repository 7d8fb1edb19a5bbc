//! Health Check API

use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;

use crate::web::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
    /// "connected" or "disabled"
    pub audit_sink: &'static str,
    /// Timestamp (ISO 8601)
    pub timestamp: String,
}

/// GET /api/health
///
/// Always 200: a disabled audit sink does not stop the portal from serving.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime_secs(),
        audit_sink: if state.audit.is_available() { "connected" } else { "disabled" },
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
