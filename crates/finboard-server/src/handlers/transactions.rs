//! Transaction table handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, MAX_PAGE_SIZE};
use finboard_core::models::{Page, PageQuery, SortField, TransactionStatus};
use finboard_core::{Transaction, TransactionSource};

/// Query parameters for the transaction table
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    /// Category filter ("All" or empty = no filter)
    pub category: Option<String>,
    /// Sort field (transactionDate or amount)
    pub sort: Option<String>,
    /// Sort direction (asc or desc)
    pub dir: Option<String>,
}

fn default_size() -> u32 {
    10
}

/// One row of the transaction table
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Clean description when present, raw otherwise
    pub description: String,
    pub display_status: TransactionStatus,
}

impl From<Transaction> for TransactionRow {
    fn from(transaction: Transaction) -> Self {
        Self {
            description: transaction.description().to_string(),
            display_status: transaction.display_status(),
            transaction,
        }
    }
}

/// GET /api/transactions - One page of the transaction table
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<Page<TransactionRow>>, AppError> {
    let sort = match params.sort.as_deref() {
        Some(s) => s
            .parse::<SortField>()
            .map_err(|e| AppError::bad_request(&e))?,
        None => SortField::default(),
    };

    let query = PageQuery {
        page: params.page,
        // Input validation: clamp page size
        size: params.size.clamp(1, MAX_PAGE_SIZE),
        category: params.category,
        sort,
        dir: params
            .dir
            .as_deref()
            .and_then(|d| d.parse().ok())
            .unwrap_or_default(),
    };

    let page = state
        .source_for(&headers)
        .fetch_page(&query)
        .await
        .map_err(AppError::from_source)?;

    Ok(Json(Page {
        content: page.content.into_iter().map(TransactionRow::from).collect(),
        total_elements: page.total_elements,
        total_pages: page.total_pages,
        number: page.number,
        size: page.size,
    }))
}
