//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};

use super::RangeQuery;
use crate::{AppError, AppState};
use finboard_core::{budget_cards, filter_by_range, BudgetCard, TransactionSource};

/// Budgets are monthly limits, so they default to the current month
const BUDGET_DEFAULT_PERIOD: &str = "this-month";

/// GET /api/budgets - Spend against each configured category limit
pub async fn get_budgets(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<RangeQuery>,
) -> Result<Json<Vec<BudgetCard>>, AppError> {
    let range = params.resolve(BUDGET_DEFAULT_PERIOD, state.today())?;

    if state.config.budgets.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let all = state
        .source_for(&headers)
        .fetch_all()
        .await
        .map_err(AppError::from_source)?;
    let window = filter_by_range(&all, Some(&range));

    Ok(Json(budget_cards(&window, &state.config.budgets)))
}
