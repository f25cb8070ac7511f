//! Shared utilities for the commands
//!
//! This module contains:
//! - `load_config` - Load the config file and apply command-line overrides
//! - `open_source` - Create the transaction source the config selects
//! - `resolve_range` - Turn `--period` / `--from` / `--to` into a date range
//! - `print_json` - Machine-readable output for `--json`

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;

use finboard_core::config::SourceKind;
use finboard_core::period::resolve_period;
use finboard_core::{Config, DateRange, SourceClient};

use crate::cli::RangeArgs;

/// Load the configuration, then apply `--backend` and `--demo`
pub fn load_config(config_path: Option<&Path>, backend: Option<&str>, demo: bool) -> Result<Config> {
    let mut config = Config::load(config_path).context("Failed to load config")?;

    if let Some(url) = backend {
        config.backend.source = SourceKind::Http;
        config.backend.url = url.trim_end_matches('/').to_string();
    }
    if demo {
        config.backend.source = SourceKind::Demo;
    }

    Ok(config)
}

/// Create the transaction source selected by the config
pub fn open_source(config: &Config) -> Result<SourceClient> {
    SourceClient::from_config(config).context("Failed to create transaction source")
}

/// The local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve the range flags, falling back to `default_period`
pub fn resolve_range(range: &RangeArgs, default_period: &str, today: NaiveDate) -> Result<DateRange> {
    let period = range.period.as_deref().unwrap_or(default_period);
    let resolved = resolve_period(period, range.from.as_deref(), range.to.as_deref(), today)?;

    if resolved.from > resolved.to {
        bail!("--from must not be after --to");
    }
    Ok(resolved)
}

/// Print `value` as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
