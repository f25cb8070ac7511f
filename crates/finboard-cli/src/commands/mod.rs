//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config loading, source creation, range flags)
//! - `summary` - Income / expense / savings totals
//! - `burn_rate` - Monthly spend and the current-month trend
//! - `transactions` - Paged transaction table
//! - `budgets` - Budget cards
//! - `dashboard` - Full dashboard, one-shot or watching
//! - `serve` - Web server command
//! - `config` - Effective configuration

pub mod budgets;
pub mod burn_rate;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod serve;
pub mod summary;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use burn_rate::*;
pub use config::*;
pub use core::*;
pub use dashboard::*;
pub use serve::*;
pub use summary::*;
pub use transactions::*;

/// Truncate a string to at most `max` characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
