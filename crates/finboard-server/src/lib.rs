//! Finboard Web Server
//!
//! Axum-based JSON API that sits between the dashboard UI and the
//! transaction backend. Every read goes to the configured transaction source;
//! nothing is stored here.
//!
//! Security features:
//! - Restrictive CORS policy
//! - Bearer tokens forwarded to the backend, never stored
//! - Input validation (page size limits, date formats)
//! - Sanitized error responses

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use finboard_core::{Config, DashboardView, SourceClient, TransactionSource, ViewSlot};

mod handlers;

/// Maximum page size for the transaction table
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub source: SourceClient,
    pub config: Config,
    /// Most recent dashboard view per caller, newest load wins
    latest_views: RwLock<HashMap<String, Arc<ViewSlot<DashboardView>>>>,
    /// Fixed evaluation date (tests); `None` uses the local clock
    today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(source: SourceClient, config: Config) -> Self {
        Self {
            source,
            config,
            latest_views: RwLock::new(HashMap::new()),
            today: None,
        }
    }

    /// Evaluate everything as of `today` instead of the local date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// The source to use for one request: the caller's bearer token, when
    /// present, replaces the configured one
    pub fn source_for(&self, headers: &HeaderMap) -> SourceClient {
        match bearer_token(headers) {
            Some(token) => self.source.with_token(token),
            None => self.source.clone(),
        }
    }

    /// The caller's dashboard slot, created on first use
    pub async fn view_slot(&self, headers: &HeaderMap) -> Arc<ViewSlot<DashboardView>> {
        let key = caller_key(headers);
        if let Some(slot) = self.latest_views.read().await.get(&key) {
            return slot.clone();
        }
        self.latest_views
            .write()
            .await
            .entry(key)
            .or_insert_with(|| Arc::new(ViewSlot::new()))
            .clone()
    }

    /// The caller's dashboard slot, if they have loaded one
    pub async fn existing_view_slot(
        &self,
        headers: &HeaderMap,
    ) -> Option<Arc<ViewSlot<DashboardView>>> {
        self.latest_views
            .read()
            .await
            .get(&caller_key(headers))
            .cloned()
    }
}

/// Slot key for the caller: SHA-256 of the bearer token, or "anonymous"
fn caller_key(headers: &HeaderMap) -> String {
    match bearer_token(headers) {
        Some(token) => {
            let mut hasher = Sha256::new();
            hasher.update(token.as_bytes());
            hex::encode(hasher.finalize())
        }
        None => "anonymous".to_string(),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Create the application router
pub fn create_router(state: AppState, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let state = Arc::new(state);

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/dashboard/latest", get(handlers::get_latest_dashboard))
        .route("/summary", get(handlers::get_summary))
        .route("/analytics/burn-rate", get(handlers::get_burn_rate))
        .route("/transactions", get(handlers::list_transactions))
        .route("/budgets", get(handlers::get_budgets));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'"
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve the dashboard UI if a directory is provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    state: AppState,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if state.source.health_check().await {
        info!("✅ Transaction source reachable: {}", state.source.name());
    } else {
        warn!(
            "⚠️  Transaction source not responding: {} (sections will show as unavailable)",
            state.source.name()
        );
    }

    let app = create_router(state, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn bad_gateway(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a transaction source failure to a response
    pub fn from_source(err: finboard_core::Error) -> Self {
        use finboard_core::Error;

        if err.is_source_unavailable() {
            return Self {
                internal: Some(err.into()),
                ..Self::bad_gateway("Transaction source unavailable")
            };
        }

        match err {
            Error::Unauthorized => Self::unauthorized("Backend rejected credentials"),
            Error::InvalidData(msg) => Self::bad_request(&msg),
            Error::NotFound(msg) => Self::not_found(&msg),
            other => other.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, status = %self.status, "Request failed");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
