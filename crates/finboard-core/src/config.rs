//! Configuration for finboard
//!
//! Loaded from `~/.config/finboard/config.toml` (or an explicit path), on top
//! of built-in defaults. Environment variables override the file:
//! - `FINBOARD_SOURCE`: `http` (default) or `demo`
//! - `FINBOARD_BACKEND_URL`: backend base URL
//! - `FINBOARD_API_TOKEN`: bearer token sent to the backend
//!
//! ```toml
//! [backend]
//! url = "http://localhost:8080"
//! timeout_secs = 30
//!
//! [burn_rate]
//! history_months = 3
//! cumulative_mode = "exact"
//!
//! [[budgets]]
//! category = "Groceries"
//! limit = 500
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::budget::BudgetLimit;
use crate::burn_rate::{BurnRateOptions, CumulativeMode};
use crate::error::{Error, Result};
use crate::period::{PERIODS, DEFAULT_PERIOD};

/// Built-in configuration
pub const DEFAULT_CONFIG: &str = r#"
[backend]
source = "http"
url = "http://localhost:8080"
fetch_all_size = 10000
timeout_secs = 30

[burn_rate]
history_months = 3
sample_points = 5
cumulative_mode = "interpolated"
use_feed = true

[dashboard]
default_period = "last-30-days"

[[budgets]]
category = "Groceries"
limit = 500

[[budgets]]
category = "Dining"
limit = 200

[[budgets]]
category = "Entertainment"
limit = 150

[[budgets]]
category = "Transportation"
limit = 300

[[budgets]]
category = "Shopping"
limit = 400
"#;

/// Where transactions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The backend service over HTTP
    #[default]
    Http,
    /// Built-in seeded demo data
    Demo,
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" | "backend" => Ok(Self::Http),
            "demo" => Ok(Self::Demo),
            _ => Err(format!("Unknown source: {} (valid: http, demo)", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendConfig {
    pub source: SourceKind,
    pub url: String,
    pub token: Option<String>,
    /// Page size used when materializing the full transaction list
    pub fetch_all_size: u32,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurnRateConfig {
    pub options: BurnRateOptions,
    /// Prefer the backend's pre-aggregated feed over local bucketing
    pub use_feed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardConfig {
    pub default_period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub burn_rate: BurnRateConfig,
    pub dashboard: DashboardConfig,
    pub budgets: Vec<BudgetLimit>,
    /// File the config was read from, if any
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                source: SourceKind::Http,
                url: "http://localhost:8080".to_string(),
                token: None,
                fetch_all_size: 10_000,
                timeout: Duration::from_secs(30),
            },
            burn_rate: BurnRateConfig {
                options: BurnRateOptions::default(),
                use_feed: true,
            },
            dashboard: DashboardConfig {
                default_period: DEFAULT_PERIOD.to_string(),
            },
            budgets: Vec::new(),
            path: None,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file falls back to the
    /// built-in configuration. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::InvalidData(format!("Failed to read config {}: {}", path.display(), e))
                })?;
                let mut config = parse_config(&content)?;
                config.path = Some(path.to_path_buf());
                config
            }
            None => match default_config_path().filter(|p| p.exists()) {
                Some(default_path) => {
                    let content = fs::read_to_string(&default_path)?;
                    let mut config = parse_config(&content)?;
                    config.path = Some(default_path);
                    config
                }
                None => parse_config(DEFAULT_CONFIG)?,
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        debug!(path = ?config.path, url = %config.backend.url, "Loaded config");
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(source) = non_empty("FINBOARD_SOURCE") {
            self.backend.source = source.parse().map_err(Error::InvalidData)?;
        }
        if let Some(url) = non_empty("FINBOARD_BACKEND_URL") {
            self.backend.url = url.trim_end_matches('/').to_string();
        }
        if let Some(token) = non_empty("FINBOARD_API_TOKEN") {
            self.backend.token = Some(token);
        }
        Ok(())
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("finboard").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    backend: Option<RawBackend>,
    burn_rate: Option<RawBurnRate>,
    dashboard: Option<RawDashboard>,
    budgets: Option<Vec<BudgetLimit>>,
}

#[derive(Debug, Deserialize)]
struct RawBackend {
    source: Option<SourceKind>,
    url: Option<String>,
    token: Option<String>,
    fetch_all_size: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawBurnRate {
    history_months: Option<u32>,
    sample_points: Option<u32>,
    cumulative_mode: Option<CumulativeMode>,
    use_feed: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawDashboard {
    default_period: Option<String>,
}

/// Parse config from TOML content on top of the defaults
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = Config::default();

    if let Some(backend) = raw.backend {
        if let Some(source) = backend.source {
            config.backend.source = source;
        }
        if let Some(url) = backend.url {
            config.backend.url = url.trim_end_matches('/').to_string();
        }
        if let Some(token) = backend.token.filter(|t| !t.is_empty()) {
            config.backend.token = Some(token);
        }
        if let Some(size) = backend.fetch_all_size {
            if size == 0 {
                return Err(Error::InvalidData("backend.fetch_all_size must be > 0".into()));
            }
            config.backend.fetch_all_size = size;
        }
        if let Some(secs) = backend.timeout_secs {
            config.backend.timeout = Duration::from_secs(secs);
        }
    }

    if let Some(burn_rate) = raw.burn_rate {
        if let Some(months) = burn_rate.history_months {
            if months == 0 {
                return Err(Error::InvalidData("burn_rate.history_months must be > 0".into()));
            }
            config.burn_rate.options.history_months = months;
        }
        if let Some(points) = burn_rate.sample_points {
            if points == 0 {
                return Err(Error::InvalidData("burn_rate.sample_points must be > 0".into()));
            }
            config.burn_rate.options.sample_points = points;
        }
        if let Some(mode) = burn_rate.cumulative_mode {
            config.burn_rate.options.cumulative_mode = mode;
        }
        if let Some(use_feed) = burn_rate.use_feed {
            config.burn_rate.use_feed = use_feed;
        }
    }

    if let Some(dashboard) = raw.dashboard {
        if let Some(period) = dashboard.default_period {
            if !PERIODS.contains(&period.to_lowercase().as_str()) {
                return Err(Error::InvalidData(format!(
                    "dashboard.default_period: unknown period {}",
                    period
                )));
            }
            config.dashboard.default_period = period;
        }
    }

    if let Some(budgets) = raw.budgets {
        if let Some(bad) = budgets.iter().find(|b| b.limit < 0.0) {
            return Err(Error::InvalidData(format!(
                "Budget limit for {} must not be negative",
                bad.category
            )));
        }
        config.budgets = budgets;
    }

    Ok(config)
}
