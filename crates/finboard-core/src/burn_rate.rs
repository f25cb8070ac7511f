//! Monthly burn-rate analysis
//!
//! Turns a transaction history (or the backend's pre-bucketed monthly feed)
//! into calendar-month buckets plus chartable trend points:
//! - past months are bars with their month total
//! - the current month is a line of cumulative spend at a few sampled days
//! - every point carries its deviation from the trailing average
//!
//! Burn rate measures spending velocity, so only outflows count.
//!
//! # Example
//!
//! ```rust,ignore
//! let builder = BurnRateBuilder::default();
//! let report = builder.from_transactions(&transactions, None, today);
//! for point in &report.points {
//!     println!("{} {:.2} ({:+.1}%)", point.label, point.value, point.percentage_diff);
//! }
//! ```

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{
    BurnRateEntry, BurnRatePoint, DateRange, MonthOverMonth, MonthlyBucket, Transaction, Trend,
    TrendPoint,
};
use crate::source::TransactionSource;

/// Month-over-month changes within this many percent are reported as neutral
pub const TREND_THRESHOLD_PERCENT: f64 = 5.0;

/// How the current month's cumulative series is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CumulativeMode {
    /// Spread the month-to-date total linearly over the elapsed days
    #[default]
    Interpolated,
    /// Replay actual transaction dates (needs raw transactions)
    Exact,
}

impl CumulativeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interpolated => "interpolated",
            Self::Exact => "exact",
        }
    }
}

impl std::str::FromStr for CumulativeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "interpolated" | "linear" => Ok(Self::Interpolated),
            "exact" => Ok(Self::Exact),
            _ => Err(format!(
                "Unknown cumulative mode: {} (valid: interpolated, exact)",
                s
            )),
        }
    }
}

impl std::fmt::Display for CumulativeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tuning for the burn-rate builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurnRateOptions {
    /// Completed months before the current one (window size and average basis)
    pub history_months: u32,
    /// Maximum number of sampled days in the current month
    pub sample_points: u32,
    pub cumulative_mode: CumulativeMode,
}

impl Default for BurnRateOptions {
    fn default() -> Self {
        Self {
            history_months: 3,
            sample_points: 5,
            cumulative_mode: CumulativeMode::Interpolated,
        }
    }
}

/// Buckets and chart points for one evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnRateReport {
    /// One bucket per month, chronological
    pub buckets: Vec<MonthlyBucket>,
    /// Trailing average of the historical buckets
    pub average: f64,
    /// Historical months first, then current-month samples in day order
    pub points: Vec<TrendPoint>,
    /// The current month's full month-to-date total against the average
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_month: Option<TrendPoint>,
    pub month_over_month: MonthOverMonth,
}

impl BurnRateReport {
    /// True when there is nothing to chart
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Builds burn-rate reports from either input path
#[derive(Debug, Clone, Default)]
pub struct BurnRateBuilder {
    options: BurnRateOptions,
}

impl BurnRateBuilder {
    pub fn new(options: BurnRateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BurnRateOptions {
        &self.options
    }

    /// Build from raw transactions.
    ///
    /// The window covers the months of `window` when given, otherwise the
    /// `history_months` months before `today` plus the current month. Months
    /// after `today`'s month are never bucketed. An empty transaction list,
    /// or one with no outflows in the window, yields an empty report.
    pub fn from_transactions(
        &self,
        transactions: &[Transaction],
        window: Option<&DateRange>,
        today: NaiveDate,
    ) -> BurnRateReport {
        if transactions.is_empty() {
            debug!("No transactions, burn-rate report is empty");
            return BurnRateReport::default();
        }

        let (start, end) = match window {
            Some(range) => (range.from, range.to.min(today)),
            None => (
                first_of_month(today)
                    .checked_sub_months(Months::new(self.options.history_months))
                    .unwrap_or_else(|| first_of_month(today)),
                today,
            ),
        };

        let buckets = monthly_buckets(transactions, start, end, today);
        let current_points = match buckets.iter().find(|b| b.is_current_month) {
            Some(current) => match self.options.cumulative_mode {
                CumulativeMode::Interpolated => {
                    cumulative_points(current.total_spent, today, self.options.sample_points)
                }
                CumulativeMode::Exact => {
                    exact_cumulative_points(transactions, today, self.options.sample_points)
                }
            },
            None => Vec::new(),
        };

        self.assemble(buckets, current_points)
    }

    /// Build from the backend's pre-aggregated monthly feed.
    ///
    /// Feed order is kept. The current month's samples are interpolated
    /// unless `transactions` is given and the mode is `Exact`. A feed with no
    /// spending in any month yields an empty report.
    pub fn from_feed(
        &self,
        entries: &[BurnRateEntry],
        transactions: Option<&[Transaction]>,
        today: NaiveDate,
    ) -> BurnRateReport {
        let buckets = buckets_from_feed(entries);
        if buckets.is_empty() {
            return BurnRateReport::default();
        }

        let current_points = match buckets.iter().find(|b| b.is_current_month) {
            Some(current) => match (self.options.cumulative_mode, transactions) {
                (CumulativeMode::Exact, Some(txs)) => {
                    exact_cumulative_points(txs, today, self.options.sample_points)
                }
                _ => cumulative_points(current.total_spent, today, self.options.sample_points),
            },
            None => Vec::new(),
        };

        self.assemble(buckets, current_points)
    }

    /// Build from the feed when it answered, from the raw transactions
    /// otherwise
    pub fn from_feed_or_transactions(
        &self,
        feed: Result<Vec<BurnRateEntry>>,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> BurnRateReport {
        match feed {
            Ok(entries) => self.from_feed(&entries, Some(transactions), today),
            Err(e) => {
                warn!(error = %e, "Burn-rate feed unavailable, computing from transactions");
                self.from_transactions(transactions, None, today)
            }
        }
    }

    /// Load a report from `source`.
    ///
    /// An explicit `window` is always bucketed locally. Otherwise the feed is
    /// used when `use_feed` is set, falling back to the raw transactions when
    /// it fails. Transactions are only fetched alongside a working feed in
    /// `Exact` mode.
    pub async fn load<S>(
        &self,
        source: &S,
        window: Option<&DateRange>,
        use_feed: bool,
        today: NaiveDate,
    ) -> Result<BurnRateReport>
    where
        S: TransactionSource + ?Sized,
    {
        if window.is_some() || !use_feed {
            let all = source.fetch_all().await?;
            return Ok(self.from_transactions(&all, window, today));
        }

        let feed = source.fetch_burn_rate(None).await;
        if let Ok(ref entries) = feed {
            if self.options.cumulative_mode == CumulativeMode::Interpolated {
                return Ok(self.from_feed(entries, None, today));
            }
        }

        let all = source.fetch_all().await?;
        Ok(self.from_feed_or_transactions(feed, &all, today))
    }

    fn assemble(
        &self,
        buckets: Vec<MonthlyBucket>,
        current_points: Vec<BurnRatePoint>,
    ) -> BurnRateReport {
        // Zero-filled months alone are nothing to chart
        if buckets.iter().all(|b| b.total_spent == 0.0) {
            debug!("No spending in the window, burn-rate report is empty");
            return BurnRateReport::default();
        }

        let average = trailing_average(&buckets, self.options.history_months);

        let historical = buckets
            .iter()
            .filter(|b| !b.is_current_month)
            .map(|b| BurnRatePoint::HistoricalMonth {
                label: b.month_label.clone(),
                total_spent: b.total_spent,
            });

        let points = historical
            .chain(current_points)
            .map(|p| trend_point(&p, average))
            .collect();

        let current_month = buckets
            .iter()
            .find(|b| b.is_current_month)
            .map(|b| TrendPoint {
                label: b.month_label.clone(),
                value: b.total_spent,
                is_current_month: true,
                day: None,
                percentage_diff: percentage_diff(b.total_spent, average),
            });

        BurnRateReport {
            month_over_month: month_over_month(&buckets),
            buckets,
            average,
            points,
            current_month,
        }
    }
}

/// Label used for a month bucket, e.g. "Nov 2025"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Label used for a current-month sample, e.g. "Feb 14"
pub fn day_label(today: NaiveDate, day: u32) -> String {
    format!("{} {}", today.format("%b"), day)
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

/// Bucket outflows per calendar month between `start` and `end` (both
/// inclusive, by month). Every month in the window gets a bucket, zero when
/// nothing was spent. The bucket for `today`'s month is marked current.
pub fn monthly_buckets(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Vec<MonthlyBucket> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    let last = first_of_month(end);
    let mut month = first_of_month(start);
    while month <= last {
        totals.insert(month, 0.0);
        match month.checked_add_months(Months::new(1)) {
            Some(next) => month = next,
            None => break,
        }
    }

    for t in transactions.iter().filter(|t| t.is_outflow()) {
        if let Some(total) = totals.get_mut(&first_of_month(t.date())) {
            *total += t.amount.abs();
        }
    }

    let current = first_of_month(today);
    totals
        .into_iter()
        .map(|(month, total_spent)| MonthlyBucket {
            month_label: month_label(month),
            total_spent,
            is_current_month: month == current,
        })
        .collect()
}

/// Convert feed entries to buckets, keeping labels unique and at most one
/// bucket current
pub fn buckets_from_feed(entries: &[BurnRateEntry]) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<MonthlyBucket> = Vec::with_capacity(entries.len());
    let mut seen_current = false;

    for entry in entries {
        let is_current = entry.current_month && !seen_current;
        if entry.current_month && seen_current {
            warn!(month = %entry.month_name, "Feed marks more than one current month, ignoring");
        }
        seen_current |= is_current;

        // Guard against negative totals from a misbehaving feed
        let total = entry.total_spent.abs();

        if let Some(existing) = buckets
            .iter_mut()
            .find(|b| b.month_label == entry.month_name)
        {
            warn!(month = %entry.month_name, "Duplicate month in feed, merging");
            existing.total_spent += total;
            existing.is_current_month |= is_current;
        } else {
            buckets.push(MonthlyBucket {
                month_label: entry.month_name.clone(),
                total_spent: total,
                is_current_month: is_current,
            });
        }
    }

    buckets
}

/// Days of the current month to sample: `min(sample_points, day_of_month)`
/// evenly spaced days, ending on today
pub fn sample_days(today: NaiveDate, sample_points: u32) -> Vec<u32> {
    let day_of_month = today.day();
    let count = sample_points.min(day_of_month);
    (1..=count).map(|i| day_of_month * i / count).collect()
}

/// Linear month-to-date series: spend at day `d` is `total * d / day_of_month`
pub fn cumulative_points(
    total_so_far: f64,
    today: NaiveDate,
    sample_points: u32,
) -> Vec<BurnRatePoint> {
    let day_of_month = f64::from(today.day());
    sample_days(today, sample_points)
        .into_iter()
        .map(|day| BurnRatePoint::CurrentMonthPoint {
            label: day_label(today, day),
            day,
            cumulative_spent: total_so_far * f64::from(day) / day_of_month,
        })
        .collect()
}

/// Month-to-date series replayed from transaction dates
pub fn exact_cumulative_points(
    transactions: &[Transaction],
    today: NaiveDate,
    sample_points: u32,
) -> Vec<BurnRatePoint> {
    let month = first_of_month(today);
    let mut daily: Vec<(u32, f64)> = transactions
        .iter()
        .filter(|t| t.is_outflow() && first_of_month(t.date()) == month)
        .map(|t| (t.date().day(), t.amount.abs()))
        .collect();
    daily.sort_by_key(|(day, _)| *day);

    sample_days(today, sample_points)
        .into_iter()
        .map(|day| BurnRatePoint::CurrentMonthPoint {
            label: day_label(today, day),
            day,
            cumulative_spent: daily
                .iter()
                .take_while(|(d, _)| *d <= day)
                .map(|(_, amount)| amount)
                .sum(),
        })
        .collect()
}

/// Mean of the most recent `history_months` non-current buckets; 0 when
/// there are none
pub fn trailing_average(buckets: &[MonthlyBucket], history_months: u32) -> f64 {
    let historical: Vec<f64> = buckets
        .iter()
        .filter(|b| !b.is_current_month)
        .map(|b| b.total_spent)
        .collect();
    let recent = &historical[historical.len().saturating_sub(history_months as usize)..];

    if recent.is_empty() {
        0.0
    } else {
        recent.iter().sum::<f64>() / recent.len() as f64
    }
}

/// Percent deviation of `value` from `average`; 0 when the average is 0
pub fn percentage_diff(value: f64, average: f64) -> f64 {
    if average > 0.0 {
        (value - average) / average * 100.0
    } else {
        0.0
    }
}

fn trend_point(point: &BurnRatePoint, average: f64) -> TrendPoint {
    TrendPoint {
        label: point.label().to_string(),
        value: point.value(),
        is_current_month: point.is_current_month(),
        day: point.day(),
        percentage_diff: percentage_diff(point.value(), average),
    }
}

/// Compare the current bucket with the one right before it
pub fn month_over_month(buckets: &[MonthlyBucket]) -> MonthOverMonth {
    let Some(index) = buckets.iter().position(|b| b.is_current_month) else {
        return MonthOverMonth::default();
    };
    if index == 0 {
        return MonthOverMonth::default();
    }

    let current = buckets[index].total_spent;
    let previous = buckets[index - 1].total_spent;
    if previous == 0.0 {
        return MonthOverMonth::default();
    }

    let change = (current - previous) / previous * 100.0;
    let trend = if change > TREND_THRESHOLD_PERCENT {
        Trend::Up
    } else if change < -TREND_THRESHOLD_PERCENT {
        Trend::Down
    } else {
        Trend::Neutral
    };

    MonthOverMonth {
        trend,
        percentage: change.abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(y: i32, m: u32, d: u32, amount: f64) -> Transaction {
        Transaction {
            id: format!("{y}-{m}-{d}-{amount}"),
            amount,
            transaction_date: date(y, m, d).and_hms_opt(14, 0, 0).unwrap(),
            category: None,
            raw_description: None,
            clean_description: None,
            status: None,
        }
    }

    fn bucket(label: &str, total: f64, current: bool) -> MonthlyBucket {
        MonthlyBucket {
            month_label: label.to_string(),
            total_spent: total,
            is_current_month: current,
        }
    }

    fn entry(label: &str, total: f64, current: bool) -> BurnRateEntry {
        BurnRateEntry {
            month_name: label.to_string(),
            total_spent: total,
            current_month: current,
        }
    }

    #[test]
    fn test_empty_input_gives_empty_report() {
        let builder = BurnRateBuilder::default();
        let report = builder.from_transactions(&[], None, date(2025, 2, 10));
        assert!(report.is_empty());
        assert!(report.points.is_empty());
        assert_eq!(report.average, 0.0);

        let report = builder.from_feed(&[], None, date(2025, 2, 10));
        assert!(report.is_empty());
    }

    #[test]
    fn test_no_spending_gives_empty_report_on_both_paths() {
        let builder = BurnRateBuilder::default();
        let feed = builder.from_feed(
            &[
                entry("Dec 2024", 0.0, false),
                entry("Jan 2025", 0.0, false),
                entry("Feb 2025", 0.0, true),
            ],
            None,
            date(2025, 2, 10),
        );
        assert!(feed.is_empty());
        assert!(feed.points.is_empty());

        let local = builder.from_transactions(&[tx(2025, 2, 3, 900.0)], None, date(2025, 2, 10));
        assert_eq!(feed, local);
    }

    #[tokio::test]
    async fn test_load_picks_input() {
        use crate::source::MemorySource;

        let today = date(2025, 2, 10);
        let txs = vec![
            tx(2024, 11, 5, -1000.0),
            tx(2024, 12, 5, -1200.0),
            tx(2025, 1, 5, -800.0),
            tx(2025, 2, 3, -500.0),
        ];
        let builder = BurnRateBuilder::default();

        let from_feed = builder
            .load(&MemorySource::new(txs.clone(), today), None, true, today)
            .await
            .unwrap();
        let fallback = builder
            .load(
                &MemorySource::new(txs.clone(), today).with_feed_failure(),
                None,
                true,
                today,
            )
            .await
            .unwrap();
        assert_eq!(from_feed.average, 1000.0);
        assert_eq!(from_feed, fallback);

        let window = DateRange::new(date(2025, 1, 1), today);
        let windowed = builder
            .load(&MemorySource::new(txs.clone(), today), Some(&window), true, today)
            .await
            .unwrap();
        assert_eq!(windowed.buckets.len(), 2);

        let offline = MemorySource::new(txs, today).offline();
        assert!(builder.load(&offline, None, true, today).await.is_err());
    }

    #[test]
    fn test_default_window_is_three_months_plus_current() {
        let txs = vec![
            tx(2024, 11, 5, -1000.0),
            tx(2024, 12, 5, -1200.0),
            tx(2025, 1, 5, -800.0),
            tx(2025, 2, 3, -500.0),
            tx(2025, 2, 4, 2000.0),
            // outside the window
            tx(2024, 10, 30, -9999.0),
        ];
        let report = BurnRateBuilder::default().from_transactions(&txs, None, date(2025, 2, 10));

        let labels: Vec<_> = report.buckets.iter().map(|b| b.month_label.as_str()).collect();
        assert_eq!(labels, vec!["Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025"]);
        assert_eq!(report.buckets[3].total_spent, 500.0);
        assert!(report.buckets[3].is_current_month);
        assert_eq!(
            report.buckets.iter().filter(|b| b.is_current_month).count(),
            1
        );
        assert_eq!(report.average, 1000.0);
    }

    #[test]
    fn test_inflows_are_excluded() {
        let txs = vec![tx(2025, 2, 1, 300.0), tx(2025, 2, 2, -100.0), tx(2025, 2, 3, -50.0)];
        let buckets = monthly_buckets(&txs, date(2025, 2, 1), date(2025, 2, 28), date(2025, 2, 20));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].total_spent, 150.0);
    }

    #[test]
    fn test_quiet_month_is_a_zero_bucket_in_the_average() {
        let txs = vec![tx(2024, 11, 5, -900.0), tx(2025, 1, 5, -600.0)];
        let report = BurnRateBuilder::default().from_transactions(&txs, None, date(2025, 2, 10));

        assert_eq!(report.buckets[1].month_label, "Dec 2024");
        assert_eq!(report.buckets[1].total_spent, 0.0);
        assert_eq!(report.average, 500.0);
    }

    #[test]
    fn test_current_month_diff_against_average() {
        let report = BurnRateBuilder::default().from_feed(
            &[
                entry("Nov 2024", 1000.0, false),
                entry("Dec 2024", 1200.0, false),
                entry("Jan 2025", 800.0, false),
                entry("Feb 2025", 1500.0, true),
            ],
            None,
            date(2025, 2, 28),
        );
        assert_eq!(report.average, 1000.0);
        let current = report.current_month.unwrap();
        assert_eq!(current.value, 1500.0);
        assert_eq!(current.percentage_diff, 50.0);
        assert_eq!(report.points[0].percentage_diff, 0.0);
        assert_eq!(report.points[1].percentage_diff, 20.0);
        assert_eq!(report.points[2].percentage_diff, -20.0);
    }

    #[test]
    fn test_interpolated_samples() {
        let points = cumulative_points(500.0, date(2025, 2, 10), 5);
        let days: Vec<_> = points.iter().filter_map(|p| p.day()).collect();
        let values: Vec<_> = points.iter().map(|p| p.value()).collect();
        assert_eq!(days, vec![2, 4, 6, 8, 10]);
        assert_eq!(values, vec![100.0, 200.0, 300.0, 400.0, 500.0]);
        assert_eq!(points[0].label(), "Feb 2");
    }

    #[test]
    fn test_sample_count_clamped_to_day_of_month() {
        assert_eq!(sample_days(date(2025, 3, 1), 5), vec![1]);
        assert_eq!(sample_days(date(2025, 3, 3), 5), vec![1, 2, 3]);
        assert_eq!(sample_days(date(2025, 3, 7), 5), vec![1, 2, 4, 5, 7]);
        assert!(sample_days(date(2025, 3, 7), 0).is_empty());
    }

    #[test]
    fn test_exact_samples_replay_transaction_dates() {
        let txs = vec![
            tx(2025, 2, 1, -100.0),
            tx(2025, 2, 5, -50.0),
            tx(2025, 2, 5, 400.0),
            tx(2025, 2, 9, -25.0),
            tx(2025, 1, 30, -999.0),
        ];
        let points = exact_cumulative_points(&txs, date(2025, 2, 10), 5);
        let values: Vec<_> = points.iter().map(|p| p.value()).collect();
        assert_eq!(values, vec![100.0, 100.0, 150.0, 150.0, 175.0]);
    }

    #[test]
    fn test_exact_mode_through_builder() {
        let options = BurnRateOptions {
            cumulative_mode: CumulativeMode::Exact,
            ..Default::default()
        };
        let txs = vec![tx(2025, 1, 15, -300.0), tx(2025, 2, 9, -40.0)];
        let report = BurnRateBuilder::new(options).from_transactions(&txs, None, date(2025, 2, 10));
        let current: Vec<_> = report.points.iter().filter(|p| p.is_current_month).collect();
        assert_eq!(current.len(), 5);
        assert_eq!(current[3].value, 0.0);
        assert_eq!(current[4].value, 40.0);
    }

    #[test]
    fn test_points_order_history_then_current_by_day() {
        let txs = vec![tx(2025, 1, 10, -200.0), tx(2025, 2, 2, -60.0)];
        let report = BurnRateBuilder::default().from_transactions(&txs, None, date(2025, 2, 15));

        let first_current = report
            .points
            .iter()
            .position(|p| p.is_current_month)
            .unwrap();
        assert!(report.points[..first_current].iter().all(|p| !p.is_current_month));
        assert!(report.points[first_current..].iter().all(|p| p.is_current_month));
        let days: Vec<_> = report.points[first_current..]
            .iter()
            .filter_map(|p| p.day)
            .collect();
        let mut sorted = days.clone();
        sorted.sort();
        assert_eq!(days, sorted);
        assert_eq!(days.last(), Some(&15));
    }

    #[test]
    fn test_zero_average_gives_zero_diff() {
        assert_eq!(percentage_diff(1234.0, 0.0), 0.0);

        let report = BurnRateBuilder::default().from_feed(
            &[entry("Jan 2025", 0.0, false), entry("Feb 2025", 300.0, true)],
            None,
            date(2025, 2, 10),
        );
        assert_eq!(report.average, 0.0);
        assert!(report.points.iter().all(|p| p.percentage_diff == 0.0));
    }

    #[test]
    fn test_fewer_than_three_months_of_history() {
        let buckets = vec![bucket("Jan 2025", 400.0, false), bucket("Feb 2025", 10.0, true)];
        assert_eq!(trailing_average(&buckets, 3), 400.0);
        assert_eq!(trailing_average(&[bucket("Feb 2025", 10.0, true)], 3), 0.0);
    }

    #[test]
    fn test_average_uses_most_recent_history() {
        let buckets = vec![
            bucket("Sep 2024", 5000.0, false),
            bucket("Oct 2024", 100.0, false),
            bucket("Nov 2024", 200.0, false),
            bucket("Dec 2024", 300.0, false),
            bucket("Jan 2025", 0.0, true),
        ];
        assert_eq!(trailing_average(&buckets, 3), 200.0);
    }

    #[test]
    fn test_explicit_window_stops_at_today() {
        let txs = vec![tx(2024, 6, 10, -10.0), tx(2024, 8, 10, -30.0)];
        let window = DateRange::new(date(2024, 6, 1), date(2024, 12, 31));
        let report = BurnRateBuilder::default().from_transactions(&txs, Some(&window), date(2024, 8, 20));
        let labels: Vec<_> = report.buckets.iter().map(|b| b.month_label.as_str()).collect();
        assert_eq!(labels, vec!["Jun 2024", "Jul 2024", "Aug 2024"]);
        assert!(report.buckets[2].is_current_month);
    }

    #[test]
    fn test_past_window_has_no_current_month() {
        let txs = vec![tx(2024, 6, 10, -10.0)];
        let window = DateRange::new(date(2024, 5, 1), date(2024, 6, 30));
        let report = BurnRateBuilder::default().from_transactions(&txs, Some(&window), date(2025, 1, 5));
        assert_eq!(report.buckets.len(), 2);
        assert!(report.current_month.is_none());
        assert!(report.points.iter().all(|p| !p.is_current_month));
    }

    #[test]
    fn test_feed_keeps_one_current_and_unique_labels() {
        let buckets = buckets_from_feed(&[
            entry("Jan 2025", 10.0, false),
            entry("Jan 2025", 5.0, false),
            entry("Feb 2025", 20.0, true),
            entry("Mar 2025", 30.0, true),
        ]);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].total_spent, 15.0);
        assert_eq!(buckets.iter().filter(|b| b.is_current_month).count(), 1);
        assert!(buckets[1].is_current_month);
    }

    #[test]
    fn test_month_over_month() {
        let up = month_over_month(&[bucket("Jan", 100.0, false), bucket("Feb", 150.0, true)]);
        assert_eq!(up.trend, Trend::Up);
        assert_eq!(up.percentage, 50.0);

        let down = month_over_month(&[bucket("Jan", 100.0, false), bucket("Feb", 80.0, true)]);
        assert_eq!(down.trend, Trend::Down);

        let flat = month_over_month(&[bucket("Jan", 100.0, false), bucket("Feb", 104.0, true)]);
        assert_eq!(flat.trend, Trend::Neutral);

        let no_prev = month_over_month(&[bucket("Jan", 0.0, false), bucket("Feb", 80.0, true)]);
        assert_eq!(no_prev, MonthOverMonth::default());

        let no_current = month_over_month(&[bucket("Jan", 10.0, false)]);
        assert_eq!(no_current.trend, Trend::Neutral);
    }

    #[test]
    fn test_month_labels_unique_across_years() {
        let txs = vec![tx(2024, 1, 1, -1.0)];
        let buckets = monthly_buckets(&txs, date(2024, 1, 1), date(2025, 1, 31), date(2025, 1, 31));
        let mut labels: Vec<_> = buckets.iter().map(|b| b.month_label.clone()).collect();
        let count = labels.len();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), count);
        assert_eq!(count, 13);
    }

    #[test]
    fn test_cumulative_mode_parse() {
        assert_eq!("EXACT".parse::<CumulativeMode>().unwrap(), CumulativeMode::Exact);
        assert_eq!(
            "linear".parse::<CumulativeMode>().unwrap(),
            CumulativeMode::Interpolated
        );
        assert!("daily".parse::<CumulativeMode>().is_err());
    }
}
