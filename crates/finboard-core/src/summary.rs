//! Income / expense aggregation for the summary cards

use crate::models::{SummaryTotals, Transaction};

/// Reduce a transaction window into summary totals.
///
/// Positive amounts count as income; everything else contributes its
/// magnitude to expenses (a zero amount adds nothing either way). Both totals
/// are therefore non-negative, and `savings` is their difference.
pub fn summarize(transactions: &[Transaction]) -> SummaryTotals {
    let (income, expenses) = transactions
        .iter()
        .fold((0.0, 0.0), |(income, expenses), t| {
            if t.amount > 0.0 {
                (income + t.amount, expenses)
            } else {
                (income, expenses + t.amount.abs())
            }
        });

    let savings = income - expenses;
    SummaryTotals {
        income,
        expenses,
        savings,
        total_balance: savings,
    }
}
