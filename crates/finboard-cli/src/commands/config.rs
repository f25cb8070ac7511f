//! Config command: show the effective configuration

use anyhow::Result;

use finboard_core::config::{default_config_path, SourceKind};
use finboard_core::fmt::format_currency;
use finboard_core::Config;

use super::print_json;

pub fn cmd_config(config: &Config, path_only: bool, json: bool) -> Result<()> {
    if path_only {
        match config.path.clone().or_else(default_config_path) {
            Some(path) => println!("{}", path.display()),
            None => println!("(no config directory on this platform)"),
        }
        return Ok(());
    }

    let shown = redacted(config);
    if json {
        return print_json(&shown);
    }

    println!("{}", render_config(&shown));
    Ok(())
}

/// Copy of `config` with the API token masked
pub fn redacted(config: &Config) -> Config {
    let mut shown = config.clone();
    if shown.backend.token.is_some() {
        shown.backend.token = Some("********".to_string());
    }
    shown
}

pub fn render_config(config: &Config) -> String {
    let file = match config.path {
        Some(ref path) => path.display().to_string(),
        None => "(built-in defaults)".to_string(),
    };
    let source = match config.backend.source {
        SourceKind::Http => "http",
        SourceKind::Demo => "demo",
    };
    let options = &config.burn_rate.options;

    let mut lines = vec![
        String::new(),
        "⚙️  Configuration".to_string(),
        "   ─────────────────────────────".to_string(),
        format!("   File:            {}", file),
        format!("   Source:          {}", source),
        format!("   Backend URL:     {}", config.backend.url),
        format!(
            "   API token:       {}",
            config.backend.token.as_deref().unwrap_or("(none)")
        ),
        format!("   Timeout:         {}s", config.backend.timeout.as_secs()),
        format!("   Default period:  {}", config.dashboard.default_period),
        format!(
            "   Burn rate:       {} months history, {} samples, {}{}",
            options.history_months,
            options.sample_points,
            options.cumulative_mode,
            if config.burn_rate.use_feed { ", backend feed" } else { ", local" }
        ),
    ];

    if config.budgets.is_empty() {
        lines.push("   Budgets:         (none)".to_string());
    } else {
        lines.push("   Budgets:".to_string());
        for budget in &config.budgets {
            lines.push(format!(
                "     {:<16} {}",
                budget.category,
                format_currency(budget.limit)
            ));
        }
    }

    lines.join("\n")
}
