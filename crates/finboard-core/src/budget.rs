//! Budget cards: category spend against a monthly limit

use serde::{Deserialize, Serialize};

use crate::filter::filter_by_category;
use crate::models::Transaction;

/// Share of the limit at which a budget is reported as near its limit
pub const NEAR_LIMIT_RATIO: f64 = 0.8;

/// A configured spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub category: String,
    pub limit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    NearLimit,
    OverBudget,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::NearLimit => "near_limit",
            Self::OverBudget => "over_budget",
        }
    }
}

/// One budget card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCard {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    /// `limit - spent`; negative when over budget
    pub remaining: f64,
    /// Progress bar fill, 0..=100
    pub percent_used: f64,
    pub status: BudgetStatus,
}

impl BudgetCard {
    pub fn new(category: &str, spent: f64, limit: f64) -> Self {
        let ratio = if limit > 0.0 {
            spent / limit
        } else if spent > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let status = if ratio > 1.0 {
            BudgetStatus::OverBudget
        } else if ratio >= NEAR_LIMIT_RATIO {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::OnTrack
        };

        Self {
            category: category.to_string(),
            spent,
            limit,
            remaining: limit - spent,
            percent_used: (ratio * 100.0).min(100.0),
            status,
        }
    }
}

/// Build a card per configured limit from an already range-filtered window.
/// Only outflows count toward a budget.
pub fn budget_cards(transactions: &[Transaction], limits: &[BudgetLimit]) -> Vec<BudgetCard> {
    limits
        .iter()
        .map(|limit| {
            let spent: f64 = filter_by_category(transactions, &limit.category)
                .filter(|t| t.is_outflow())
                .map(|t| t.amount.abs())
                .sum();
            BudgetCard::new(&limit.category, spent, limit.limit)
        })
        .collect()
}
