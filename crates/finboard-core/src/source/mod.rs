//! Pluggable transaction sources
//!
//! The dashboard only ever reads transactions, so a source is a small
//! read-only interface over wherever they live.
//!
//! # Architecture
//!
//! - `TransactionSource` trait: the operations every source supports
//! - `SourceClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Implementations: `HttpSource` (the backend service), `MemorySource`
//!   (fixed data, including the seeded demo set)
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = Config::load(None)?;
//! let source = SourceClient::from_config(&config)?;
//! let all = source.fetch_all().await?;
//! ```

mod demo;
mod http;
mod memory;

pub use demo::{demo_transactions, DEMO_SEED, DEMO_TRANSACTION_COUNT};
pub use http::HttpSource;
pub use memory::MemorySource;

use async_trait::async_trait;
use chrono::Local;
use tracing::info;

use crate::config::{Config, SourceKind};
use crate::error::Result;
use crate::models::{BurnRateEntry, DateRange, Page, PageQuery, Transaction};

/// Read-only access to a transaction store
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch one page of transactions
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page<Transaction>>;

    /// Fetch every transaction, newest first
    async fn fetch_all(&self) -> Result<Vec<Transaction>>;

    /// Fetch the pre-aggregated monthly burn-rate feed.
    ///
    /// With no range the source picks its default window (the current month
    /// and the three before it).
    async fn fetch_burn_rate(&self, range: Option<&DateRange>) -> Result<Vec<BurnRateEntry>>;

    /// Check if the source is reachable
    async fn health_check(&self) -> bool;

    /// Short description for logs and status output
    fn name(&self) -> String;
}

/// Concrete source enum
#[derive(Clone)]
pub enum SourceClient {
    /// Backend service over HTTP
    Http(HttpSource),
    /// In-memory data (demo set or fixtures)
    Memory(MemorySource),
}

impl SourceClient {
    /// Create the source selected by `config.backend.source`
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = match config.backend.source {
            SourceKind::Http => SourceClient::Http(HttpSource::from_config(&config.backend)?),
            SourceKind::Demo => SourceClient::demo(),
        };
        info!(source = %client.name(), "Using transaction source");
        Ok(client)
    }

    /// Seeded demo data anchored on today's date
    pub fn demo() -> Self {
        SourceClient::Memory(MemorySource::demo(Local::now().date_naive()))
    }

    /// Create a copy that authenticates with `token` instead of the
    /// configured one. Sources without authentication are returned as is.
    pub fn with_token(&self, token: &str) -> Self {
        match self {
            SourceClient::Http(s) => SourceClient::Http(s.with_token(token)),
            SourceClient::Memory(s) => SourceClient::Memory(s.clone()),
        }
    }
}

// Implement TransactionSource for SourceClient by delegating to the inner source
#[async_trait]
impl TransactionSource for SourceClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page<Transaction>> {
        match self {
            SourceClient::Http(s) => s.fetch_page(query).await,
            SourceClient::Memory(s) => s.fetch_page(query).await,
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Transaction>> {
        match self {
            SourceClient::Http(s) => s.fetch_all().await,
            SourceClient::Memory(s) => s.fetch_all().await,
        }
    }

    async fn fetch_burn_rate(&self, range: Option<&DateRange>) -> Result<Vec<BurnRateEntry>> {
        match self {
            SourceClient::Http(s) => s.fetch_burn_rate(range).await,
            SourceClient::Memory(s) => s.fetch_burn_rate(range).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            SourceClient::Http(s) => s.health_check().await,
            SourceClient::Memory(s) => s.health_check().await,
        }
    }

    fn name(&self) -> String {
        match self {
            SourceClient::Http(s) => s.name(),
            SourceClient::Memory(s) => s.name(),
        }
    }
}
