//! Finboard Core Library
//!
//! Shared functionality for the finboard personal finance dashboard:
//! - Transaction models as delivered by the backend service
//! - Date-range filtering and period presets
//! - Income / expense / savings aggregation
//! - Monthly burn-rate buckets, trailing averages and trend points
//! - Budget cards
//! - Pluggable transaction sources (HTTP backend, in-memory, demo data)
//! - Dashboard loader with independent section degradation

pub mod budget;
pub mod burn_rate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod fmt;
pub mod models;
pub mod period;
pub mod source;
pub mod summary;

/// Test utilities including a mock backend server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use budget::{budget_cards, BudgetCard, BudgetLimit, BudgetStatus};
pub use burn_rate::{BurnRateBuilder, BurnRateOptions, BurnRateReport, CumulativeMode};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardView, Section, ViewSlot};
pub use error::{Error, Result};
pub use filter::filter_by_range;
pub use models::{DateRange, SummaryTotals, Transaction};
pub use source::{HttpSource, MemorySource, SourceClient, TransactionSource};
pub use summary::summarize;
