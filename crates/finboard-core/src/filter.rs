//! Date-range filtering of an already-fetched transaction list

use crate::models::{DateRange, Transaction};

/// Narrow `transactions` to those dated within `range` (inclusive).
///
/// Order is preserved. With no range the input is returned unchanged.
/// Timestamps are compared as supplied, without timezone normalization.
pub fn filter_by_range(transactions: &[Transaction], range: Option<&DateRange>) -> Vec<Transaction> {
    match range {
        Some(range) => transactions
            .iter()
            .filter(|t| range.contains_timestamp(&t.transaction_date))
            .cloned()
            .collect(),
        None => transactions.to_vec(),
    }
}

/// Narrow `transactions` to one category (case-insensitive)
pub fn filter_by_category<'a>(
    transactions: &'a [Transaction],
    category: &'a str,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions.iter().filter(move |t| t.in_category(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(id: &str, y: i32, m: u32, d: u32, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            transaction_date: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            category: None,
            raw_description: None,
            clean_description: None,
            status: None,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("a", 2025, 1, 31, -10.0),
            tx("b", 2025, 2, 1, -20.0),
            tx("c", 2025, 2, 14, 300.0),
            tx("d", 2025, 2, 28, -5.0),
            tx("e", 2025, 3, 1, -7.5),
        ]
    }

    fn feb() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        )
    }

    #[test]
    fn test_inclusive_bounds() {
        let ids: Vec<_> = filter_by_range(&sample(), Some(&feb()))
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_no_range_is_identity() {
        assert_eq!(filter_by_range(&sample(), None), sample());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = filter_by_range(&sample(), Some(&feb()));
        let twice = filter_by_range(&once, Some(&feb()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_covering_range_returns_input_in_order() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        assert_eq!(filter_by_range(&sample(), Some(&range)), sample());
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2030, 1, 31).unwrap(),
        );
        assert!(filter_by_range(&sample(), Some(&range)).is_empty());
    }

    #[test]
    fn test_swapped_bounds_are_not_reordered() {
        let swapped = DateRange::new(feb().to, feb().from);
        assert!(filter_by_range(&sample(), Some(&swapped)).is_empty());
    }

    #[test]
    fn test_filter_by_category_ignores_case() {
        let mut txs = sample();
        txs[1].category = Some("Dining".into());
        txs[3].category = Some("dining".into());
        let ids: Vec<_> = filter_by_category(&txs, "DINING").map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d"]);
    }
}
