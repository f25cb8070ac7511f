//! Summary handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;

use super::RangeQuery;
use crate::{AppError, AppState};
use finboard_core::{filter_by_range, summarize, DateRange, SummaryTotals, TransactionSource};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub range: DateRange,
    pub transaction_count: usize,
    pub totals: SummaryTotals,
}

/// GET /api/summary - Income, expenses and savings for a date range
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<RangeQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    let range = params.resolve(&state.config.dashboard.default_period, state.today())?;

    let all = state
        .source_for(&headers)
        .fetch_all()
        .await
        .map_err(AppError::from_source)?;
    let window = filter_by_range(&all, Some(&range));

    Ok(Json(SummaryResponse {
        range,
        transaction_count: window.len(),
        totals: summarize(&window),
    }))
}
