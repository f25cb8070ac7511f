//! Dashboard handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};

use super::RangeQuery;
use crate::{AppError, AppState};
use finboard_core::{Dashboard, DashboardView};

/// GET /api/dashboard - Summary, burn rate and budgets for one date range
///
/// Sections degrade independently, so this answers 200 even when the
/// source is down; each section reports its own state.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<RangeQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let today = state.today();
    let range = params.resolve(&state.config.dashboard.default_period, today)?;

    let slot = state.view_slot(&headers).await;
    let ticket = slot.ticket();
    let dashboard = Dashboard::from_config(state.source_for(&headers), &state.config);
    let view = dashboard.load(&range, today).await;

    slot.publish(ticket, view.clone()).await;

    Ok(Json(view))
}

/// GET /api/dashboard/latest - The caller's most recently loaded dashboard
/// view. Views are kept per bearer token; a caller never sees another's.
pub async fn get_latest_dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardView>, AppError> {
    let latest = match state.existing_view_slot(&headers).await {
        Some(slot) => slot.latest().await,
        None => None,
    };

    latest
        .map(Json)
        .ok_or_else(|| AppError::not_found("No dashboard has been loaded yet"))
}
