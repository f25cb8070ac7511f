//! Burn-rate analytics handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use super::RangeQuery;
use crate::{AppError, AppState};
use finboard_core::{BurnRateBuilder, BurnRateReport, CumulativeMode};

/// Query parameters for the burn-rate chart
#[derive(Debug, Deserialize)]
pub struct BurnRateQuery {
    /// Period preset; when no range is given the default four-month window is used
    pub period: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// Cumulative series mode (interpolated or exact)
    pub mode: Option<String>,
}

/// GET /api/analytics/burn-rate - Monthly buckets and trend points
pub async fn get_burn_rate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<BurnRateQuery>,
) -> Result<Json<BurnRateReport>, AppError> {
    let today = state.today();
    let source = state.source_for(&headers);

    let mut options = state.config.burn_rate.options;
    if let Some(ref mode) = params.mode {
        options.cumulative_mode = mode
            .parse::<CumulativeMode>()
            .map_err(|e| AppError::bad_request(&e))?;
    }
    let builder = BurnRateBuilder::new(options);

    let range_query = RangeQuery {
        period: params.period,
        from: params.from,
        to: params.to,
    };

    // An explicit range is always bucketed locally
    let window = if range_query.is_set()? {
        Some(range_query.resolve(&state.config.dashboard.default_period, today)?)
    } else {
        None
    };

    let report = builder
        .load(&source, window.as_ref(), state.config.burn_rate.use_feed, today)
        .await
        .map_err(AppError::from_source)?;
    Ok(Json(report))
}
