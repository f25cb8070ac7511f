//! Dashboard command: every section in one view, optionally refreshing

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use finboard_core::fmt::{format_currency, format_percentage_diff, format_signed};
use finboard_core::{Config, Dashboard, DashboardView, Section, SourceClient, ViewSlot};

use super::{print_json, render_budgets, resolve_range, today};
use crate::cli::RangeArgs;

pub async fn cmd_dashboard(
    source: SourceClient,
    config: &Config,
    range: &RangeArgs,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let window = resolve_range(range, &config.dashboard.default_period, today)?;
    let view = Dashboard::from_config(source, config)
        .load(&window, today)
        .await;
    print_view(&view, json)
}

/// Reload the dashboard every `interval_secs` until Ctrl-C.
///
/// Loads run in the background; a load that finishes after a newer one has
/// been shown is dropped.
pub async fn cmd_dashboard_watch(
    source: SourceClient,
    config: &Config,
    range: &RangeArgs,
    interval_secs: u64,
    json: bool,
) -> Result<()> {
    let dashboard = Dashboard::from_config(source, config);
    let slot: Arc<ViewSlot<DashboardView>> = Arc::new(ViewSlot::new());

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    println!("👀 Refreshing every {}s (Ctrl-C to stop)", interval_secs.max(1));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let today = today();
                let window = resolve_range(range, &config.dashboard.default_period, today)?;
                let ticket = slot.ticket();
                let dashboard = dashboard.clone();
                let slot = slot.clone();

                tokio::spawn(async move {
                    let view = dashboard.load(&window, today).await;
                    if slot.publish(ticket, view.clone()).await {
                        if let Err(e) = print_view(&view, json) {
                            warn!(error = %e, "Failed to print dashboard");
                        }
                    } else {
                        debug!(ticket, "Skipped stale dashboard load");
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("👋 Stopped watching");
                break;
            }
        }
    }

    Ok(())
}

fn print_view(view: &DashboardView, json: bool) -> Result<()> {
    if json {
        return print_json(view);
    }
    println!("{}", render_dashboard(view));
    Ok(())
}

/// Render a full dashboard view
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut lines = vec![
        String::new(),
        "╭─────────────────────────────────────────╮".to_string(),
        "│         💰 Finboard Dashboard           │".to_string(),
        "╰─────────────────────────────────────────╯".to_string(),
        format!("  {} · {} transactions", view.range, view.transaction_count),
        String::new(),
        "  📊 Summary".to_string(),
    ];

    match &view.summary {
        Section::Ready(totals) => {
            lines.push(format!("     Income:    {}", format_currency(totals.income)));
            lines.push(format!("     Expenses:  {}", format_currency(totals.expenses)));
            lines.push(format!("     Savings:   {}", format_signed(totals.savings)));
        }
        other => lines.push(section_notice(other)),
    }

    lines.push(String::new());
    lines.push("  🔥 Burn Rate".to_string());
    match &view.burn_rate {
        Section::Ready(report) => {
            lines.push(format!("     Average:   {}", format_currency(report.average)));
            if let Some(ref current) = report.current_month {
                lines.push(format!(
                    "     {}:  {} ({} vs average)",
                    current.label,
                    format_currency(current.value),
                    format_percentage_diff(current.percentage_diff)
                ));
            }
            lines.push(format!(
                "     Trend:     {} {:.1}% vs last month",
                report.month_over_month.trend.as_str(),
                report.month_over_month.percentage
            ));
        }
        other => lines.push(section_notice(other)),
    }

    lines.push(String::new());
    lines.push("  🎯 Budgets".to_string());
    match &view.budgets {
        Section::Ready(cards) => lines.push(render_budgets(cards)),
        other => lines.push(section_notice(other)),
    }

    lines.join("\n")
}

fn section_notice<T>(section: &Section<T>) -> String {
    match section {
        Section::Unavailable { reason } => format!("     ⚠️  Unavailable: {}", reason),
        _ => "     No data".to_string(),
    }
}
