//! Transactions command: one page of the transaction table

use anyhow::{anyhow, Context, Result};

use finboard_core::fmt::format_signed;
use finboard_core::models::{Page, PageQuery, SortDirection, SortField};
use finboard_core::{SourceClient, Transaction, TransactionSource};

use super::{print_json, truncate};

pub async fn cmd_transactions(
    source: &SourceClient,
    page: u32,
    size: u32,
    category: Option<&str>,
    sort: &str,
    dir: &str,
    json: bool,
) -> Result<()> {
    if size == 0 {
        return Err(anyhow!("--size must be at least 1"));
    }

    let query = PageQuery {
        page,
        size,
        category: category.map(str::to_string),
        sort: sort.parse::<SortField>().map_err(|e| anyhow!(e))?,
        dir: dir.parse::<SortDirection>().map_err(|e| anyhow!(e))?,
    };

    let result = source
        .fetch_page(&query)
        .await
        .context("Failed to fetch transactions")?;

    if json {
        return print_json(&result);
    }

    println!("{}", render_transactions(&result));
    Ok(())
}

/// Render a page of transactions as a table
pub fn render_transactions(page: &Page<Transaction>) -> String {
    if page.content.is_empty() {
        return "No transactions found.".to_string();
    }

    let mut lines = vec![
        String::new(),
        format!("💳 Transactions ({} total)", page.total_elements),
        "   ──────────────────────────────────────────────────────────────────────────"
            .to_string(),
    ];

    for tx in &page.content {
        lines.push(format!(
            "   {} │ {:<32} │ {:<14} │ {:>12} │ {}",
            tx.transaction_date.format("%Y-%m-%d"),
            truncate(tx.description(), 32),
            truncate(tx.category.as_deref().unwrap_or("-"), 14),
            format_signed(tx.amount),
            tx.display_status().as_str()
        ));
    }

    lines.push(
        "   ──────────────────────────────────────────────────────────────────────────"
            .to_string(),
    );
    lines.push(format!(
        "   Page {} of {}",
        page.number + 1,
        page.total_pages.max(1)
    ));

    lines.join("\n")
}
