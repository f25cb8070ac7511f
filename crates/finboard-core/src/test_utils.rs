//! Test utilities for finboard-core
//!
//! Provides a mock of the transaction backend that can be used for
//! integration tests and local development.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use tokio::sync::oneshot;

use crate::models::{DateRange, PageQuery, Transaction};
use crate::period::parse_date;
use crate::source::{MemorySource, TransactionSource};

/// How the mock backend misbehaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockMode {
    /// Everything answers normally
    #[default]
    Healthy,
    /// `/api/analytics/burn-rate` returns 500
    FeedDown,
    /// Every endpoint returns 500
    Down,
}

#[derive(Clone)]
struct MockState {
    source: MemorySource,
    mode: MockMode,
    required_token: Option<String>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A request the mock backend received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub params: HashMap<String, String>,
    pub authorization: Option<String>,
}

/// Mock transaction backend for testing and development
pub struct MockBackendServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockBackendServer {
    /// Start a healthy mock serving `transactions`, with `today` as its clock
    pub async fn start(transactions: Vec<Transaction>, today: NaiveDate) -> Self {
        Self::start_with(transactions, today, MockMode::Healthy, None).await
    }

    /// Start a mock with a failure mode and an optional required bearer token
    pub async fn start_with(
        transactions: Vec<Transaction>,
        today: NaiveDate,
        mode: MockMode,
        required_token: Option<&str>,
    ) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            source: MemorySource::new(transactions, today),
            mode,
            required_token: required_token.map(str::to_string),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/api/transactions", get(handle_transactions))
            .route("/api/analytics/burn-rate", get(handle_burn_rate))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockBackendServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Record the request and apply auth and failure modes
fn admit(
    state: &MockState,
    path: &str,
    headers: &HeaderMap,
    params: &HashMap<String, String>,
) -> Option<Response> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.requests.lock().unwrap().push(RecordedRequest {
        path: path.to_string(),
        params: params.clone(),
        authorization: authorization.clone(),
    });

    if let Some(ref token) = state.required_token {
        if authorization.as_deref() != Some(format!("Bearer {}", token).as_str()) {
            return Some(StatusCode::UNAUTHORIZED.into_response());
        }
    }

    if state.mode == MockMode::Down {
        return Some((StatusCode::INTERNAL_SERVER_ERROR, "backend down").into_response());
    }

    None
}

/// Paged transactions, shaped like the real backend's page envelope
async fn handle_transactions(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(rejected) = admit(&state, "/api/transactions", &headers, &params) {
        return rejected;
    }

    let defaults = PageQuery::default();
    let query = PageQuery {
        page: params
            .get("page")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.page),
        size: params
            .get("size")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.size),
        category: params.get("category").cloned(),
        sort: params
            .get("sort")
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        dir: params
            .get("dir")
            .and_then(|d| d.parse().ok())
            .unwrap_or_default(),
    };

    match state.source.fetch_page(&query).await {
        Ok(page) => Json(page).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

/// Monthly burn-rate feed
async fn handle_burn_rate(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(rejected) = admit(&state, "/api/analytics/burn-rate", &headers, &params) {
        return rejected;
    }
    if state.mode == MockMode::FeedDown {
        return (StatusCode::INTERNAL_SERVER_ERROR, "analytics unavailable").into_response();
    }

    let range = match (
        params.get("startDate").and_then(|d| parse_date(d)),
        params.get("endDate").and_then(|d| parse_date(d)),
    ) {
        (Some(from), Some(to)) => Some(DateRange::new(from, to)),
        _ => None,
    };

    match state.source.fetch_burn_rate(range.as_ref()).await {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
