//! Finboard CLI - Personal finance dashboard
//!
//! Usage:
//!   finboard summary --period this-month   Income, expenses and savings
//!   finboard burn-rate                     Monthly spend and current trend
//!   finboard transactions --size 20        Browse transactions
//!   finboard budgets                       Spend against budget limits
//!   finboard dashboard --watch             Full dashboard, refreshing
//!   finboard serve --port 3000             Start web server
//!
//! Add `--demo` to any command to use built-in sample data.

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let config = commands::load_config(cli.config.as_deref(), cli.backend.as_deref(), cli.demo)?;

    if let Commands::Config { path } = cli.command {
        return commands::cmd_config(&config, path, cli.json);
    }

    let source = commands::open_source(&config)?;
    let today = commands::today();

    match cli.command {
        Commands::Summary { range } => {
            commands::cmd_summary(&source, &config, &range, today, cli.json).await
        }
        Commands::BurnRate { mode, local, range } => {
            commands::cmd_burn_rate(
                &source,
                &config,
                mode.as_deref(),
                local,
                &range,
                today,
                cli.json,
            )
            .await
        }
        Commands::Transactions {
            page,
            size,
            category,
            sort,
            dir,
        } => {
            commands::cmd_transactions(
                &source,
                page,
                size,
                category.as_deref(),
                &sort,
                &dir,
                cli.json,
            )
            .await
        }
        Commands::Budgets { range } => {
            commands::cmd_budgets(&source, &config, &range, today, cli.json).await
        }
        Commands::Dashboard {
            range,
            watch,
            interval,
        } => {
            if watch {
                commands::cmd_dashboard_watch(source, &config, &range, interval, cli.json).await
            } else {
                commands::cmd_dashboard(source, &config, &range, today, cli.json).await
            }
        }
        Commands::Serve {
            port,
            host,
            static_dir,
            allowed_origins,
        } => {
            commands::cmd_serve(
                config,
                source,
                &host,
                port,
                static_dir.as_deref(),
                allowed_origins,
            )
            .await
        }
        Commands::Config { .. } => Ok(()),
    }
}
