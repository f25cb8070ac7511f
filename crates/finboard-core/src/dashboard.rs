//! Dashboard loader
//!
//! Fetches everything one dashboard render needs and turns it into sections
//! that degrade independently: a failing burn-rate feed never takes the
//! summary down, and a failing transaction fetch still lets the feed-based
//! chart render.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::budget::{budget_cards, BudgetCard, BudgetLimit};
use crate::burn_rate::{BurnRateBuilder, BurnRateReport};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::filter::filter_by_range;
use crate::models::{BurnRateEntry, DateRange, SummaryTotals, Transaction};
use crate::source::{SourceClient, TransactionSource};
use crate::summary::summarize;

/// Outcome of one dashboard section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    /// Loaded fine, nothing to show
    NoData,
    /// The data could not be loaded
    Unavailable { reason: String },
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready(_))
    }

    fn unavailable(err: &Error) -> Self {
        Section::Unavailable {
            reason: err.to_string(),
        }
    }
}

/// Everything one dashboard render shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub range: DateRange,
    /// Transactions inside the range
    pub transaction_count: usize,
    pub summary: Section<SummaryTotals>,
    pub burn_rate: Section<BurnRateReport>,
    pub budgets: Section<Vec<BudgetCard>>,
}

/// Loads dashboard views from a transaction source
#[derive(Clone)]
pub struct Dashboard {
    source: SourceClient,
    builder: BurnRateBuilder,
    use_feed: bool,
    budgets: Vec<BudgetLimit>,
}

impl Dashboard {
    /// Dashboard with default burn-rate settings and no budgets
    pub fn new(source: SourceClient) -> Self {
        Self {
            source,
            builder: BurnRateBuilder::default(),
            use_feed: true,
            budgets: Vec::new(),
        }
    }

    pub fn from_config(source: SourceClient, config: &Config) -> Self {
        Self {
            source,
            builder: BurnRateBuilder::new(config.burn_rate.options),
            use_feed: config.burn_rate.use_feed,
            budgets: config.budgets.clone(),
        }
    }

    /// Replace the configured budget limits
    pub fn with_budgets(mut self, budgets: Vec<BudgetLimit>) -> Self {
        self.budgets = budgets;
        self
    }

    /// Compute the burn rate locally instead of asking for the feed
    pub fn without_feed(mut self) -> Self {
        self.use_feed = false;
        self
    }

    pub fn source(&self) -> &SourceClient {
        &self.source
    }

    /// Load one view for `range`, evaluated as of `today`.
    ///
    /// The transaction list and the burn-rate feed are fetched concurrently.
    /// The chart uses the feed when it answers and falls back to bucketing
    /// the raw transactions when it does not.
    pub async fn load(&self, range: &DateRange, today: NaiveDate) -> DashboardView {
        let (transactions, feed) = if self.use_feed {
            let (transactions, feed) = tokio::join!(
                self.source.fetch_all(),
                self.source.fetch_burn_rate(None)
            );
            (transactions, Some(feed))
        } else {
            (self.source.fetch_all().await, None)
        };

        let window = match &transactions {
            Ok(all) => filter_by_range(all, Some(range)),
            Err(e) => {
                warn!(error = %e, "Transactions unavailable");
                Vec::new()
            }
        };

        let summary = match &transactions {
            Ok(_) => Section::Ready(summarize(&window)),
            Err(e) => Section::unavailable(e),
        };

        let budgets = match &transactions {
            Ok(_) if self.budgets.is_empty() => Section::NoData,
            Ok(_) => Section::Ready(budget_cards(&window, &self.budgets)),
            Err(e) => Section::unavailable(e),
        };

        let burn_rate = self.burn_rate_section(transactions.as_deref().ok(), feed, today);

        debug!(
            range = %range,
            count = window.len(),
            summary = summary.is_ready(),
            burn_rate = burn_rate.is_ready(),
            "Dashboard loaded"
        );

        DashboardView {
            range: *range,
            transaction_count: window.len(),
            summary,
            burn_rate,
            budgets,
        }
    }

    fn burn_rate_section(
        &self,
        transactions: Option<&[Transaction]>,
        feed: Option<Result<Vec<BurnRateEntry>>>,
        today: NaiveDate,
    ) -> Section<BurnRateReport> {
        let report = match (feed, transactions) {
            (Some(feed), Some(txs)) => self.builder.from_feed_or_transactions(feed, txs, today),
            (None, Some(txs)) => self.builder.from_transactions(txs, None, today),
            (Some(Ok(entries)), None) => self.builder.from_feed(&entries, None, today),
            (Some(Err(e)), None) => {
                warn!(error = %e, "Burn rate unavailable");
                return Section::unavailable(&e);
            }
            (None, None) => {
                return Section::Unavailable {
                    reason: "transactions unavailable".to_string(),
                }
            }
        };

        if report.is_empty() {
            Section::NoData
        } else {
            Section::Ready(report)
        }
    }
}

/// Holds the most recent dashboard result across overlapping loads.
///
/// Every load takes a ticket before it starts; a result is only published
/// when no newer ticket has been published already, so a slow stale load
/// can never overwrite a fresher one.
pub struct ViewSlot<T> {
    next_ticket: AtomicU64,
    published: RwLock<Option<(u64, T)>>,
}

impl<T: Clone> ViewSlot<T> {
    pub fn new() -> Self {
        Self {
            next_ticket: AtomicU64::new(0),
            published: RwLock::new(None),
        }
    }

    /// Take the ticket for a new load; tickets increase monotonically
    pub fn ticket(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish `value` for `ticket`. Returns false (and drops the value) when
    /// a newer ticket has already been published.
    pub async fn publish(&self, ticket: u64, value: T) -> bool {
        let mut published = self.published.write().await;
        match published.as_ref() {
            Some((current, _)) if *current > ticket => {
                debug!(ticket, current = *current, "Discarding stale result");
                false
            }
            _ => {
                *published = Some((ticket, value));
                true
            }
        }
    }

    /// The latest published value
    pub async fn latest(&self) -> Option<T> {
        self.published.read().await.as_ref().map(|(_, v)| v.clone())
    }

    /// Ticket of the latest published value
    pub async fn latest_ticket(&self) -> Option<u64> {
        self.published.read().await.as_ref().map(|(t, _)| *t)
    }
}

impl<T: Clone> Default for ViewSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(id: &str, amount: f64, d: NaiveDate, category: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            transaction_date: d.and_hms_opt(9, 30, 0).unwrap(),
            category: Some(category.to_string()),
            raw_description: None,
            clean_description: None,
            status: None,
        }
    }

    fn today() -> NaiveDate {
        date(2025, 3, 10)
    }

    fn memory() -> MemorySource {
        MemorySource::new(
            vec![
                tx("1", 2000.0, date(2025, 3, 1), "Transfers"),
                tx("2", -100.0, date(2025, 3, 2), "Groceries"),
                tx("3", -50.0, date(2025, 2, 20), "Dining"),
                tx("4", -1000.0, date(2024, 12, 15), "Travel"),
            ],
            today(),
        )
    }

    fn march() -> DateRange {
        DateRange::new(date(2025, 3, 1), today())
    }

    #[tokio::test]
    async fn test_load_all_sections() {
        let dashboard = Dashboard::new(SourceClient::Memory(memory())).with_budgets(vec![
            BudgetLimit {
                category: "Groceries".to_string(),
                limit: 500.0,
            },
        ]);
        let view = dashboard.load(&march(), today()).await;

        assert_eq!(view.transaction_count, 2);
        let summary = view.summary.ready().unwrap();
        assert_eq!(summary.income, 2000.0);
        assert_eq!(summary.expenses, 100.0);
        assert_eq!(summary.savings, 1900.0);

        let report = view.burn_rate.ready().unwrap();
        let labels: Vec<&str> = report.buckets.iter().map(|b| b.month_label.as_str()).collect();
        assert_eq!(labels, ["Dec 2024", "Jan 2025", "Feb 2025", "Mar 2025"]);
        // (1000 + 0 + 50) / 3
        assert_eq!(report.average, 350.0);

        let cards = view.budgets.ready().unwrap();
        assert_eq!(cards[0].spent, 100.0);
    }

    #[tokio::test]
    async fn test_feed_failure_falls_back_to_transactions() {
        let source = SourceClient::Memory(memory().with_feed_failure());
        let view = Dashboard::new(source).load(&march(), today()).await;

        assert!(view.summary.is_ready());
        let report = view.burn_rate.ready().unwrap();
        assert_eq!(report.buckets.len(), 4);
        assert_eq!(report.buckets[3].total_spent, 100.0);
        assert_eq!(view.budgets, Section::NoData);
    }

    #[tokio::test]
    async fn test_offline_source_marks_sections_unavailable() {
        let source = SourceClient::Memory(memory().offline());
        let view = Dashboard::new(source).load(&march(), today()).await;

        assert!(matches!(view.summary, Section::Unavailable { .. }));
        assert!(matches!(view.burn_rate, Section::Unavailable { .. }));
        assert_eq!(view.transaction_count, 0);
    }

    #[tokio::test]
    async fn test_empty_source_has_no_chart() {
        let source = SourceClient::Memory(MemorySource::new(Vec::new(), today()));

        // The feed answers with zero-filled months; that is still no data
        let feed = Dashboard::new(source.clone()).load(&march(), today()).await;
        assert_eq!(feed.summary, Section::Ready(SummaryTotals::default()));
        assert_eq!(feed.burn_rate, Section::NoData);

        let local = Dashboard::new(source).without_feed().load(&march(), today()).await;
        assert_eq!(feed.burn_rate, local.burn_rate);
    }

    #[tokio::test]
    async fn test_income_only_source_has_no_chart() {
        let source = SourceClient::Memory(MemorySource::new(
            vec![tx("1", 2000.0, date(2025, 3, 1), "Transfers")],
            today(),
        ));

        let feed = Dashboard::new(source.clone()).load(&march(), today()).await;
        let local = Dashboard::new(source).without_feed().load(&march(), today()).await;
        assert_eq!(feed.burn_rate, Section::NoData);
        assert_eq!(local.burn_rate, Section::NoData);
    }

    #[test]
    fn test_section_serialization() {
        let json = serde_json::to_value(Section::<u32>::Unavailable {
            reason: "down".to_string(),
        })
        .unwrap();
        assert_eq!(json["state"], "unavailable");
        assert_eq!(json["data"]["reason"], "down");

        let json = serde_json::to_value(Section::Ready(BurnRateEntry {
            month_name: "Mar 2025".to_string(),
            total_spent: 1.0,
            current_month: true,
        }))
        .unwrap();
        assert_eq!(json["state"], "ready");
        assert_eq!(json["data"]["monthName"], "Mar 2025");
    }

    #[tokio::test]
    async fn test_view_slot_discards_stale_results() {
        let slot = ViewSlot::new();
        let first = slot.ticket();
        let second = slot.ticket();
        assert!(second > first);

        assert!(slot.publish(second, "fresh").await);
        assert!(!slot.publish(first, "stale").await);
        assert_eq!(slot.latest().await, Some("fresh"));
        assert_eq!(slot.latest_ticket().await, Some(second));
    }

    #[tokio::test]
    async fn test_view_slot_concurrent_loads() {
        let slot = Arc::new(ViewSlot::new());
        let tickets: Vec<u64> = (0..8).map(|_| slot.ticket()).collect();
        let newest = *tickets.last().unwrap();

        let handles: Vec<_> = tickets
            .into_iter()
            .rev()
            .map(|t| {
                let slot = slot.clone();
                tokio::spawn(async move { slot.publish(t, t).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(slot.latest().await, Some(newest));
    }
}
