//! Burn-rate command: monthly spend and the current month's trend

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

use finboard_core::fmt::{format_currency, format_percentage_diff};
use finboard_core::models::Trend;
use finboard_core::{BurnRateBuilder, BurnRateReport, Config, CumulativeMode, SourceClient};

use super::{print_json, resolve_range};
use crate::cli::RangeArgs;

pub async fn cmd_burn_rate(
    source: &SourceClient,
    config: &Config,
    mode: Option<&str>,
    local: bool,
    range: &RangeArgs,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let report = build_report(source, config, mode, local, range, today).await?;

    if json {
        return print_json(&report);
    }

    println!("{}", render_burn_rate(&report));
    Ok(())
}

/// Compute the report the way the dashboard does: the backend feed when
/// allowed and reachable, local bucketing otherwise
pub async fn build_report(
    source: &SourceClient,
    config: &Config,
    mode: Option<&str>,
    local: bool,
    range: &RangeArgs,
    today: NaiveDate,
) -> Result<BurnRateReport> {
    let mut options = config.burn_rate.options;
    if let Some(mode) = mode {
        options.cumulative_mode = mode.parse::<CumulativeMode>().map_err(|e| anyhow!(e))?;
    }
    let builder = BurnRateBuilder::new(options);

    let window = if range.is_set() {
        Some(resolve_range(range, &config.dashboard.default_period, today)?)
    } else {
        None
    };

    builder
        .load(
            source,
            window.as_ref(),
            config.burn_rate.use_feed && !local,
            today,
        )
        .await
        .context("Failed to load burn rate")
}

/// Render the burn-rate report as a table plus the current-month trend
pub fn render_burn_rate(report: &BurnRateReport) -> String {
    if report.is_empty() {
        return "🔥 No spending to chart yet.".to_string();
    }

    let mut lines = vec![
        String::new(),
        "🔥 Burn Rate".to_string(),
        "   ─────────────────────────────────────────".to_string(),
        format!("   {:<12} │ {:>12} │ {:>10}", "Month", "Spent", "vs avg"),
        "   ─────────────────────────────────────────".to_string(),
    ];

    for point in report.points.iter().filter(|p| !p.is_current_month) {
        lines.push(format!(
            "   {:<12} │ {:>12} │ {:>10}",
            point.label,
            format_currency(point.value),
            format_percentage_diff(point.percentage_diff)
        ));
    }

    let samples: Vec<_> = report.points.iter().filter(|p| p.is_current_month).collect();
    if !samples.is_empty() {
        lines.push("   ─────────────────────────────────────────".to_string());
        for point in samples {
            lines.push(format!(
                "   {:<12} │ {:>12} │ {:>10}",
                point.label,
                format_currency(point.value),
                format_percentage_diff(point.percentage_diff)
            ));
        }
    }

    lines.push("   ─────────────────────────────────────────".to_string());
    lines.push(format!("   Average:       {}", format_currency(report.average)));

    if let Some(ref current) = report.current_month {
        lines.push(format!(
            "   This month:    {} ({} vs average)",
            format_currency(current.value),
            format_percentage_diff(current.percentage_diff)
        ));
    }

    let mom = &report.month_over_month;
    let arrow = match mom.trend {
        Trend::Up => "📈",
        Trend::Down => "📉",
        Trend::Neutral => "➡️ ",
    };
    lines.push(format!(
        "   vs last month: {} {} {:.1}%",
        arrow,
        mom.trend.as_str(),
        mom.percentage
    ));

    lines.join("\n")
}
