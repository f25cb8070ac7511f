//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Finboard - Personal finance dashboard
#[derive(Parser)]
#[command(name = "finboard")]
#[command(about = "Personal finance dashboard: summaries, burn rate and budgets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: ~/.config/finboard/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides config and FINBOARD_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Use the built-in demo data instead of the backend
    #[arg(long, global = true, conflicts_with = "backend")]
    pub demo: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Date range selection shared by the reporting commands
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Period preset: this-month, last-month, this-year, last-year,
    /// last-30-days, last-90-days, last-12-months, all
    #[arg(short, long)]
    pub period: Option<String>,

    /// Custom start date (YYYY-MM-DD, requires --to)
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Custom end date (YYYY-MM-DD, requires --from)
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show income, expenses and savings for a date range
    Summary {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Show monthly spending with the current month's cumulative trend
    BurnRate {
        /// Cumulative series mode: interpolated or exact
        #[arg(short, long)]
        mode: Option<String>,

        /// Bucket transactions locally instead of using the backend feed
        #[arg(long)]
        local: bool,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// List one page of transactions
    Transactions {
        /// Page number (zero-based)
        #[arg(long, default_value = "0")]
        page: u32,

        /// Page size
        #[arg(short, long, default_value = "20")]
        size: u32,

        /// Filter by category ("All" for no filter)
        #[arg(short, long)]
        category: Option<String>,

        /// Sort field: transactionDate or amount
        #[arg(long, default_value = "transactionDate")]
        sort: String,

        /// Sort direction: asc or desc
        #[arg(long, default_value = "desc")]
        dir: String,
    },

    /// Show spend against each configured budget
    Budgets {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Show the full dashboard
    Dashboard {
        #[command(flatten)]
        range: RangeArgs,

        /// Keep refreshing every --interval seconds until Ctrl-C
        #[arg(short, long)]
        watch: bool,

        /// Refresh interval in seconds for --watch
        #[arg(long, default_value = "30")]
        interval: u64,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origin (repeatable)
        #[arg(long = "allow-origin")]
        allowed_origins: Vec<String>,
    },

    /// Show the effective configuration
    Config {
        /// Only print the config file location
        #[arg(long)]
        path: bool,
    },
}

impl RangeArgs {
    /// Whether a period or a custom range was given on the command line
    pub fn is_set(&self) -> bool {
        self.period.is_some() || (self.from.is_some() && self.to.is_some())
    }
}
