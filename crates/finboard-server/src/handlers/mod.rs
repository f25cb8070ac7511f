//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analytics;
pub mod budgets;
pub mod dashboard;
pub mod health;
pub mod summary;
pub mod transactions;

// Re-export all handlers for use in router
pub use analytics::*;
pub use budgets::*;
pub use dashboard::*;
pub use health::*;
pub use summary::*;
pub use transactions::*;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::AppError;
use finboard_core::period::resolve_period;
use finboard_core::DateRange;

/// Date-range query parameters shared by the dashboard endpoints
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    /// Period preset (this-month, last-30-days, etc)
    pub period: Option<String>,
    /// Custom start date (YYYY-MM-DD)
    pub from: Option<String>,
    /// Custom end date (YYYY-MM-DD)
    pub to: Option<String>,
}

impl RangeQuery {
    /// Whether the caller picked a range at all. A custom range needs both
    /// `from` and `to`.
    pub fn is_set(&self) -> Result<bool, AppError> {
        if self.from.is_some() != self.to.is_some() {
            return Err(AppError::bad_request("from and to must be given together"));
        }
        Ok(self.period.is_some() || self.from.is_some())
    }

    /// Resolve to a date range, using `default_period` when nothing is given
    pub fn resolve(&self, default_period: &str, today: NaiveDate) -> Result<DateRange, AppError> {
        self.is_set()?;
        let period = self.period.as_deref().unwrap_or(default_period);
        let range = resolve_period(period, self.from.as_deref(), self.to.as_deref(), today)
            .map_err(AppError::from_source)?;

        if range.from > range.to {
            return Err(AppError::bad_request("from must not be after to"));
        }
        Ok(range)
    }
}
