//! Domain models for finboard
//!
//! Field names on the wire are camelCase: that is what the backend service
//! produces and what the dashboard API hands to the presentation layer.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Transactions above this magnitude without a category are flagged for review
pub const FLAG_THRESHOLD: f64 = 1000.0;

/// A financial transaction as read from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Opaque identifier assigned by the backend
    pub id: String,
    /// Negative = outflow, positive = inflow
    pub amount: f64,
    pub transaction_date: NaiveDateTime,
    pub category: Option<String>,
    /// Bank statement text as imported
    #[serde(default)]
    pub raw_description: Option<String>,
    /// Human-readable merchant description (filled in by the backend)
    #[serde(default)]
    pub clean_description: Option<String>,
    /// Processing status as reported by the backend, if any
    #[serde(default)]
    pub status: Option<String>,
}

impl Transaction {
    /// Calendar date of the transaction
    pub fn date(&self) -> NaiveDate {
        self.transaction_date.date()
    }

    pub fn is_inflow(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }

    /// Whether the transaction carries a non-empty category
    pub fn has_category(&self) -> bool {
        self.category.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Case-insensitive category match
    pub fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(category))
    }

    /// Best description available for display
    pub fn description(&self) -> &str {
        self.clean_description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.raw_description.as_deref())
            .unwrap_or("")
    }

    /// Status to display: a recognised backend status wins, otherwise it is
    /// derived from data completeness
    pub fn display_status(&self) -> TransactionStatus {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| TransactionStatus::determine(self))
    }
}

/// Review status of a transaction in the transaction table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Not yet processed
    Raw,
    /// Has both a clean description and a category
    Cleaned,
    /// High-value and uncategorized
    Flagged,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "Raw",
            Self::Cleaned => "Cleaned",
            Self::Flagged => "Flagged",
        }
    }

    /// Derive the status from the transaction's fields
    pub fn determine(tx: &Transaction) -> Self {
        let has_clean = tx
            .clean_description
            .as_deref()
            .is_some_and(|d| !d.is_empty());
        let has_category = tx.has_category();

        if has_clean && has_category {
            Self::Cleaned
        } else if tx.amount.abs() > FLAG_THRESHOLD && !has_category {
            Self::Flagged
        } else {
            Self::Raw
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "cleaned" => Ok(Self::Cleaned),
            "flagged" => Ok(Self::Flagged),
            _ => Err(format!("Unknown transaction status: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive calendar date interval
///
/// `from <= to` is the caller's responsibility; bounds are never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Whether `date` lies within `[from, to]`
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Whether the timestamp's calendar date lies within the range.
    /// The whole `to` day is included.
    pub fn contains_timestamp(&self, ts: &NaiveDateTime) -> bool {
        self.contains(ts.date())
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.from.format("%b %-d, %Y"),
            self.to.format("%b %-d, %Y")
        )
    }
}

/// Income / expense totals over a window of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub income: f64,
    pub expenses: f64,
    /// `income - expenses`
    pub savings: f64,
    /// Net position over the window (equal to `savings`), not a ledger balance
    pub total_balance: f64,
}

// ========== Pagination ==========

/// One page of results, shaped like the backend's paging envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    /// Zero-based page index
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    pub fn empty(number: u32, size: u32) -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number,
            size,
        }
    }
}

/// Sortable transaction fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    #[serde(rename = "transactionDate")]
    TransactionDate,
    #[serde(rename = "amount")]
    Amount,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransactionDate => "transactionDate",
            Self::Amount => "amount",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "transactiondate" | "date" => Ok(Self::TransactionDate),
            "amount" => Ok(Self::Amount),
            _ => Err(format!(
                "Unknown sort field: {} (valid: transactionDate, amount)",
                s
            )),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    /// Anything other than "asc" sorts descending, as the backend does
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else {
            Ok(Self::Desc)
        }
    }
}

/// Query for one page of the transaction table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    /// Category filter; `None`, empty and "All" mean unfiltered
    pub category: Option<String>,
    pub sort: SortField,
    pub dir: SortDirection,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            category: None,
            sort: SortField::default(),
            dir: SortDirection::default(),
        }
    }
}

impl PageQuery {
    /// The effective category filter, if any
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
    }
}

// ========== Burn Rate Models ==========

/// Pre-aggregated monthly spending entry from the backend's burn-rate feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnRateEntry {
    /// e.g. "Nov 2025"
    pub month_name: String,
    pub total_spent: f64,
    #[serde(alias = "isCurrentMonth")]
    pub current_month: bool,
}

/// Spending total for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    /// Unique within one computed set, e.g. "Nov 2025"
    pub month_label: String,
    /// Sum of outflow magnitudes for the month
    pub total_spent: f64,
    pub is_current_month: bool,
}

/// A chartable burn-rate point
///
/// Past months are bars carrying the month total; the current month is drawn
/// as a line of cumulative spend at sampled days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BurnRatePoint {
    HistoricalMonth {
        label: String,
        #[serde(rename = "totalSpent")]
        total_spent: f64,
    },
    CurrentMonthPoint {
        label: String,
        day: u32,
        #[serde(rename = "cumulativeSpent")]
        cumulative_spent: f64,
    },
}

impl BurnRatePoint {
    pub fn label(&self) -> &str {
        match self {
            Self::HistoricalMonth { label, .. } | Self::CurrentMonthPoint { label, .. } => label,
        }
    }

    /// The amount compared against the trailing average
    pub fn value(&self) -> f64 {
        match self {
            Self::HistoricalMonth { total_spent, .. } => *total_spent,
            Self::CurrentMonthPoint {
                cumulative_spent, ..
            } => *cumulative_spent,
        }
    }

    pub fn is_current_month(&self) -> bool {
        matches!(self, Self::CurrentMonthPoint { .. })
    }

    pub fn day(&self) -> Option<u32> {
        match self {
            Self::HistoricalMonth { .. } => None,
            Self::CurrentMonthPoint { day, .. } => Some(*day),
        }
    }
}

/// A chart point with its deviation from the trailing average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub label: String,
    pub value: f64,
    pub is_current_month: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    /// Percent above (positive) or below (negative) the trailing average
    pub percentage_diff: f64,
}

/// Direction of the current month relative to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Neutral => "neutral",
        }
    }
}

/// Month-over-month change of the current month's spend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOverMonth {
    pub trend: Trend,
    /// Absolute percentage change
    pub percentage: f64,
}

impl Default for MonthOverMonth {
    fn default() -> Self {
        Self {
            trend: Trend::Neutral,
            percentage: 0.0,
        }
    }
}
