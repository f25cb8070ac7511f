//! Budgets command: spend against each configured limit

use anyhow::{Context, Result};
use chrono::NaiveDate;

use finboard_core::fmt::format_currency;
use finboard_core::{
    budget_cards, filter_by_range, BudgetCard, BudgetStatus, Config, SourceClient,
    TransactionSource,
};

use super::{print_json, resolve_range};
use crate::cli::RangeArgs;

/// Budgets are monthly, so the default window is the current month
pub const BUDGET_PERIOD: &str = "this-month";

const BAR_WIDTH: usize = 20;

pub async fn cmd_budgets(
    source: &SourceClient,
    config: &Config,
    range: &RangeArgs,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    if config.budgets.is_empty() {
        match config.path {
            Some(ref path) => println!("No budgets configured. Add [[budgets]] to {}", path.display()),
            None => println!("No budgets configured. Add [[budgets]] to your config file."),
        }
        return Ok(());
    }

    let range = resolve_range(range, BUDGET_PERIOD, today)?;
    let all = source
        .fetch_all()
        .await
        .context("Failed to fetch transactions")?;
    let window = filter_by_range(&all, Some(&range));
    let cards = budget_cards(&window, &config.budgets);

    if json {
        return print_json(&cards);
    }

    println!();
    println!("🎯 Budgets ({})", range);
    println!("{}", render_budgets(&cards));
    Ok(())
}

/// Render budget cards with a progress bar each
pub fn render_budgets(cards: &[BudgetCard]) -> String {
    let mut lines = vec!["   ─────────────────────────────────────────────────────────".to_string()];

    for card in cards {
        let icon = match card.status {
            BudgetStatus::OnTrack => "✅",
            BudgetStatus::NearLimit => "⚠️ ",
            BudgetStatus::OverBudget => "🚨",
        };
        lines.push(format!(
            "   {} {:<16} {} {:>10} / {:<10}",
            icon,
            card.category,
            progress_bar(card.percent_used),
            format_currency(card.spent),
            format_currency(card.limit)
        ));
        if card.remaining < 0.0 {
            lines.push(format!(
                "      over by {}",
                format_currency(card.remaining.abs())
            ));
        }
    }

    lines.join("\n")
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
