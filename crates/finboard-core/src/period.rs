//! Period presets for the date-range selector

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::burn_rate::first_of_month;
use crate::error::{Error, Result};
use crate::models::DateRange;

/// Preset used when the caller picks nothing
pub const DEFAULT_PERIOD: &str = "last-30-days";

/// All accepted preset names
pub const PERIODS: &[&str] = &[
    "this-month",
    "last-month",
    "this-year",
    "last-year",
    "last-30-days",
    "last-90-days",
    "last-12-months",
    "all",
];

/// Resolve a period preset (or explicit `from`/`to` dates) to a date range
/// relative to `today`.
///
/// Explicit dates win over the preset when both are given; they must be
/// YYYY-MM-DD.
pub fn resolve_period(
    period: &str,
    custom_from: Option<&str>,
    custom_to: Option<&str>,
    today: NaiveDate,
) -> Result<DateRange> {
    if let (Some(from), Some(to)) = (custom_from, custom_to) {
        let from = parse_date(from)
            .ok_or_else(|| Error::InvalidData("Invalid from date format (use YYYY-MM-DD)".into()))?;
        let to = parse_date(to)
            .ok_or_else(|| Error::InvalidData("Invalid to date format (use YYYY-MM-DD)".into()))?;
        return Ok(DateRange::new(from, to));
    }

    let this_month = first_of_month(today);
    let jan_first = |year: i32| {
        NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| Error::InvalidData(format!("Year out of range: {}", year)))
    };

    let range = match period.to_lowercase().as_str() {
        "this-month" => DateRange::new(this_month, today),
        "last-month" => {
            let from = months_back(this_month, 1)?;
            DateRange::new(from, this_month - Duration::days(1))
        }
        "this-year" => DateRange::new(jan_first(today.year())?, today),
        "last-year" => DateRange::new(
            jan_first(today.year() - 1)?,
            jan_first(today.year())? - Duration::days(1),
        ),
        "last-30-days" => DateRange::new(today - Duration::days(30), today),
        "last-90-days" => DateRange::new(today - Duration::days(90), today),
        "last-12-months" => DateRange::new(months_back(this_month, 12)?, today),
        "all" => DateRange::new(jan_first(2000)?, today),
        _ => {
            return Err(Error::InvalidData(format!(
                "Unknown period: {}. Available: {}",
                period,
                PERIODS.join(", ")
            )))
        }
    };

    Ok(range)
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn months_back(month: NaiveDate, n: u32) -> Result<NaiveDate> {
    month
        .checked_sub_months(Months::new(n))
        .ok_or_else(|| Error::InvalidData(format!("Date out of range: {} minus {} months", month, n)))
}
