//! Summary command: income, expenses and savings for a date range

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use finboard_core::fmt::{format_currency, format_signed};
use finboard_core::{
    filter_by_range, summarize, Config, DateRange, SourceClient, SummaryTotals, TransactionSource,
};

use super::{print_json, resolve_range};
use crate::cli::RangeArgs;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryOutput {
    range: DateRange,
    transaction_count: usize,
    totals: SummaryTotals,
}

pub async fn cmd_summary(
    source: &SourceClient,
    config: &Config,
    range: &RangeArgs,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let range = resolve_range(range, &config.dashboard.default_period, today)?;
    let all = source
        .fetch_all()
        .await
        .context("Failed to fetch transactions")?;
    let window = filter_by_range(&all, Some(&range));
    let totals = summarize(&window);

    if json {
        return print_json(&SummaryOutput {
            range,
            transaction_count: window.len(),
            totals,
        });
    }

    println!("{}", render_summary(&range, window.len(), &totals));
    Ok(())
}

/// Render the summary cards as text
pub fn render_summary(range: &DateRange, count: usize, totals: &SummaryTotals) -> String {
    [
        String::new(),
        format!("📊 Summary ({})", range),
        "   ─────────────────────────────".to_string(),
        format!("   Transactions:  {}", count),
        format!("   Income:        {}", format_currency(totals.income)),
        format!("   Expenses:      {}", format_currency(totals.expenses)),
        format!("   Savings:       {}", format_signed(totals.savings)),
        format!("   Net balance:   {}", format_signed(totals.total_balance)),
    ]
    .join("\n")
}
