//! Seeded demo data
//!
//! A deterministic year of messy bank-statement transactions for trying the
//! dashboard without a backend.

use chrono::{Duration, NaiveDate, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Transaction;

/// Number of generated transactions
pub const DEMO_TRANSACTION_COUNT: usize = 500;

/// Seed for the demo generator; same seed and anchor date, same data
pub const DEMO_SEED: u64 = 0x0F1B_0A2D;

const RAW_DESCRIPTIONS: &[&str] = &[
    "VZW*WEBSITE PMT",
    "7-ELEVEN 0042",
    "WLMRT ST#1024",
    "AMZN MKTP US*2K4H91JF0",
    "NETFLIX.COM",
    "SPOTIFY USA",
    "UBER *TRIP",
    "LYFT *RIDE",
    "SHELL OIL 57442136",
    "CHEVRON 0012345",
    "COSTCO WHSE #1234",
    "TARGET 00012345",
    "WALGREENS #9876",
    "CVS/PHARMACY #4521",
    "STARBUCKS 12345",
    "DUNKIN #351423",
    "CHIPOTLE 1234",
    "GRUBHUB*SEAMLESS",
    "DOORDASH*DASHPASS",
    "INSTACART",
    "WHOLEFDS MKT 10234",
    "TRADER JOE'S #123",
    "KROGER #12345",
    "ALDI 76001",
    "HOME DEPOT #1234",
    "BESTBUY 00000123",
    "APPLE.COM/BILL",
    "STEAM PURCHASE",
    "HULU*SUBSCRIPTION",
    "DISNEY PLUS",
    "COMCAST CABLE",
    "DUKE ENERGY",
    "WATER UTILITY PMT",
    "STATE FARM INS",
    "GEICO *AUTO",
    "PLANET FITNESS",
    "PELOTON*MEMBERSHIP",
    "GITHUB INC",
    "VENMO *PAYMENT",
    "ZELLE *SENT",
    "USPS PO 123456789",
    "EBAY O*12-34567-89012",
    "ETSY.COM",
    "IKEA US ONLINE",
    "NORDSTROM #123",
    "TJ MAXX #1234",
    "NIKE.COM",
    "SEPHORA #123",
    "CHEWY.COM",
    "PETSMART #1234",
    "AUTOZONE #12345",
    "JIFFY LUBE #1234",
    "MARRIOTT HTL*STAY",
    "AIRBNB*RESERVATION",
    "DELTA AIR*TICKET",
    "SOUTHWEST AIR",
];

/// `None` leaves a transaction uncategorized
const CATEGORIES: &[Option<&str>] = &[
    Some("Utilities"),
    Some("Groceries"),
    Some("Dining"),
    Some("Transportation"),
    Some("Entertainment"),
    Some("Shopping"),
    Some("Healthcare"),
    Some("Insurance"),
    Some("Subscriptions"),
    Some("Travel"),
    Some("Gas"),
    Some("Personal Care"),
    Some("Pets"),
    Some("Home"),
    Some("Electronics"),
    Some("Clothing"),
    Some("Fitness"),
    Some("Transfers"),
    None,
];

const LOCATIONS: &[&str] = &[
    "SAN FRAN CA",
    "NEW YORK NY",
    "HOUSTON TX",
    "MIAMI FL",
    "SEATTLE WA",
    "CHICAGO IL",
    "PHILA PA",
    "COLUMBUS OH",
    "ATLANTA GA",
    "CHARLOTTE NC",
];

/// Generate the demo set for the year before `today`, newest first.
///
/// 80% are expenses between -5 and -500, 20% income between +100 and +3000.
/// Clean descriptions are left empty, as imported data would be.
pub fn demo_transactions(today: NaiveDate) -> Vec<Transaction> {
    let mut rng = StdRng::seed_from_u64(DEMO_SEED);
    let base = (today - Duration::days(365)).and_time(NaiveTime::MIN);

    let mut transactions: Vec<Transaction> = (0..DEMO_TRANSACTION_COUNT)
        .map(|i| {
            let raw_description = raw_description(&mut rng);
            let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())].map(str::to_string);
            let amount = if rng.gen_range(0..5) < 4 {
                -round_cents(rng.gen_range(5.0..500.0))
            } else {
                round_cents(rng.gen_range(100.0..3000.0))
            };
            let transaction_date = base
                + Duration::days(rng.gen_range(0..365))
                + Duration::hours(rng.gen_range(0..24))
                + Duration::minutes(rng.gen_range(0..60));

            Transaction {
                id: format!("demo-{:04}", i + 1),
                amount,
                transaction_date,
                category,
                raw_description: Some(raw_description),
                clean_description: None,
                status: None,
            }
        })
        .collect();

    transactions.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
    transactions
}

fn raw_description(rng: &mut StdRng) -> String {
    let mut description = RAW_DESCRIPTIONS[rng.gen_range(0..RAW_DESCRIPTIONS.len())].to_string();
    if rng.gen_bool(0.5) {
        description.push_str(&format!(" {:05}", rng.gen_range(0..100_000)));
    }
    if rng.gen_range(0..3) == 0 {
        description.push(' ');
        description.push_str(LOCATIONS[rng.gen_range(0..LOCATIONS.len())]);
    }
    description
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_demo_is_deterministic() {
        assert_eq!(demo_transactions(today()), demo_transactions(today()));
    }

    #[test]
    fn test_demo_shape() {
        let txs = demo_transactions(today());
        assert_eq!(txs.len(), DEMO_TRANSACTION_COUNT);

        let earliest = today() - Duration::days(365);
        for t in &txs {
            assert!(t.date() >= earliest && t.date() < today(), "{}", t.date());
            assert!(
                (-500.0..=-5.0).contains(&t.amount) || (100.0..=3000.0).contains(&t.amount),
                "{}",
                t.amount
            );
            assert!(t.raw_description.is_some());
            assert!(t.clean_description.is_none());
        }

        assert!(txs.windows(2).all(|w| w[0].transaction_date >= w[1].transaction_date));
    }

    #[test]
    fn test_demo_mix() {
        let txs = demo_transactions(today());
        let expenses = txs.iter().filter(|t| t.is_outflow()).count();
        // 80/20 split, with slack for the draw
        assert!((350..=450).contains(&expenses), "{}", expenses);
        assert!(txs.iter().any(|t| t.category.is_none()));
    }
}
