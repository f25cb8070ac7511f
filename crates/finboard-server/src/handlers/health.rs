//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use finboard_core::TransactionSource;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub source: String,
    pub source_healthy: bool,
}

/// GET /api/health - Server status and source reachability
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let source_healthy = state.source.health_check().await;

    Json(HealthResponse {
        status: if source_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        source: state.source.name(),
        source_healthy,
    })
}
