//! In-memory transaction source
//!
//! Serves a fixed transaction list with the same paging, filtering and
//! feed semantics as the backend. Used for the demo data set and in tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Months, NaiveDate};

use crate::burn_rate::{first_of_month, monthly_buckets};
use crate::error::{Error, Result};
use crate::models::{
    BurnRateEntry, DateRange, Page, PageQuery, SortDirection, SortField, Transaction,
};

use super::demo::demo_transactions;
use super::TransactionSource;

/// Months before the end month covered by the feed when no start is given
const FEED_DEFAULT_HISTORY: u32 = 3;

/// Fixed-data source
#[derive(Clone)]
pub struct MemorySource {
    transactions: Arc<Vec<Transaction>>,
    /// Clock used for the feed's current month and default window
    today: NaiveDate,
    label: String,
    /// Whether the burn-rate feed should fail
    feed_fails: bool,
    /// Whether every request should fail
    offline: bool,
}

impl MemorySource {
    /// Create a source over `transactions` with `today` as its clock
    pub fn new(transactions: Vec<Transaction>, today: NaiveDate) -> Self {
        Self {
            transactions: Arc::new(transactions),
            today,
            label: "memory".to_string(),
            feed_fails: false,
            offline: false,
        }
    }

    /// Seeded demo data for the year before `today`
    pub fn demo(today: NaiveDate) -> Self {
        Self {
            label: "demo".to_string(),
            ..Self::new(demo_transactions(today), today)
        }
    }

    /// Make the burn-rate feed fail while transactions still load
    pub fn with_feed_failure(mut self) -> Self {
        self.feed_fails = true;
        self
    }

    /// Make every request fail, as if the backend were down
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline {
            return Err(Error::Backend {
                status: 503,
                message: format!("{} source is offline", self.label),
            });
        }
        Ok(())
    }

    fn sorted(&self, sort: SortField, dir: SortDirection) -> Vec<Transaction> {
        let mut sorted = self.transactions.as_ref().clone();
        match sort {
            SortField::TransactionDate => {
                sorted.sort_by(|a, b| a.transaction_date.cmp(&b.transaction_date))
            }
            SortField::Amount => sorted.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
        }
        if dir == SortDirection::Desc {
            sorted.reverse();
        }
        sorted
    }
}

#[async_trait]
impl TransactionSource for MemorySource {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page<Transaction>> {
        self.ensure_online()?;
        if query.size == 0 {
            return Err(Error::InvalidData("Page size must be at least 1".into()));
        }

        let mut matching = self.sorted(query.sort, query.dir);
        if let Some(category) = query.category_filter() {
            matching.retain(|t| t.in_category(category));
        }

        let total_elements = matching.len() as u64;
        let size = query.size as usize;
        let total_pages = matching.len().div_ceil(size) as u32;
        let content = matching
            .into_iter()
            .skip(query.page as usize * size)
            .take(size)
            .collect();

        Ok(Page {
            content,
            total_elements,
            total_pages,
            number: query.page,
            size: query.size,
        })
    }

    async fn fetch_all(&self) -> Result<Vec<Transaction>> {
        self.ensure_online()?;
        Ok(self.sorted(SortField::TransactionDate, SortDirection::Desc))
    }

    /// One entry per month from the start month through the end month, each
    /// the total of that month's outflows
    async fn fetch_burn_rate(&self, range: Option<&DateRange>) -> Result<Vec<BurnRateEntry>> {
        self.ensure_online()?;
        if self.feed_fails {
            return Err(Error::Backend {
                status: 500,
                message: "burn-rate feed unavailable".to_string(),
            });
        }

        let end = range.map(|r| r.to).unwrap_or(self.today);
        let start = match range {
            Some(r) => r.from,
            None => first_of_month(end)
                .checked_sub_months(Months::new(FEED_DEFAULT_HISTORY))
                .unwrap_or_else(|| first_of_month(end)),
        };

        Ok(monthly_buckets(&self.transactions, start, end, self.today)
            .into_iter()
            .map(|b| BurnRateEntry {
                month_name: b.month_label,
                total_spent: b.total_spent,
                current_month: b.is_current_month,
            })
            .collect())
    }

    async fn health_check(&self) -> bool {
        !self.offline
    }

    fn name(&self) -> String {
        format!("{} ({} transactions)", self.label, self.transactions.len())
    }
}
