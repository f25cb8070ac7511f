//! Integration tests for finboard-core
//!
//! These tests run the HTTP source and the dashboard loader against a mock
//! backend on a local port.

use chrono::NaiveDate;
use finboard_core::{
    error::Error,
    models::{PageQuery, SortDirection, SortField},
    source::{HttpSource, SourceClient, TransactionSource},
    test_utils::{MockBackendServer, MockMode},
    BudgetLimit, Dashboard, DateRange, Section, Transaction,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2025, 3, 10)
}

fn tx(id: &str, amount: f64, d: NaiveDate, category: Option<&str>) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount,
        transaction_date: d.and_hms_opt(14, 5, 0).unwrap(),
        category: category.map(str::to_string),
        raw_description: Some(format!("RAW {}", id)),
        clean_description: None,
        status: None,
    }
}

/// Four months of activity ending in the mock's current month
fn history() -> Vec<Transaction> {
    vec![
        tx("1", -1000.0, date(2024, 12, 3), Some("Travel")),
        tx("2", -1200.0, date(2025, 1, 14), Some("Shopping")),
        tx("3", -800.0, date(2025, 2, 9), Some("Groceries")),
        tx("4", 3000.0, date(2025, 2, 28), Some("Transfers")),
        tx("5", -1000.0, date(2025, 3, 2), Some("Groceries")),
        tx("6", -500.0, date(2025, 3, 8), Some("Dining")),
        tx("7", 250.0, date(2025, 3, 9), None),
    ]
}

fn march() -> DateRange {
    DateRange::new(date(2025, 3, 1), today())
}

// =============================================================================
// HTTP Source
// =============================================================================

#[tokio::test]
async fn test_fetch_page_forwards_query() {
    let server = MockBackendServer::start(history(), today()).await;
    let source = HttpSource::new(&server.url()).unwrap();

    let query = PageQuery {
        page: 0,
        size: 2,
        category: Some("groceries".to_string()),
        sort: SortField::Amount,
        dir: SortDirection::Asc,
    };
    let page = source.fetch_page(&query).await.unwrap();

    assert_eq!(page.total_elements, 2);
    assert_eq!(page.content[0].id, "5");
    assert_eq!(page.content[1].id, "3");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].params.get("sort").map(String::as_str), Some("amount"));
    assert_eq!(requests[0].params.get("dir").map(String::as_str), Some("asc"));
    assert_eq!(requests[0].authorization, None);
}

#[tokio::test]
async fn test_fetch_all_walks_pages() {
    let server = MockBackendServer::start(history(), today()).await;
    let source = HttpSource::new(&server.url()).unwrap().with_page_size(3);

    let all = source.fetch_all().await.unwrap();
    assert_eq!(all.len(), 7);
    assert_eq!(all[0].id, "7");
    assert_eq!(server.requests().len(), 3);
}

#[tokio::test]
async fn test_fetch_burn_rate_feed() {
    let server = MockBackendServer::start(history(), today()).await;
    let source = HttpSource::new(&server.url()).unwrap();

    let feed = source.fetch_burn_rate(None).await.unwrap();
    let totals: Vec<f64> = feed.iter().map(|e| e.total_spent).collect();
    assert_eq!(totals, [1000.0, 1200.0, 800.0, 1500.0]);
    assert!(feed[3].current_month);

    let range = DateRange::new(date(2025, 2, 1), date(2025, 3, 10));
    let feed = source.fetch_burn_rate(Some(&range)).await.unwrap();
    assert_eq!(feed.len(), 2);

    let last = server.requests().pop().unwrap();
    assert_eq!(last.params.get("startDate").map(String::as_str), Some("2025-02-01"));
    assert_eq!(last.params.get("endDate").map(String::as_str), Some("2025-03-10"));
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server =
        MockBackendServer::start_with(history(), today(), MockMode::Healthy, Some("s3cret")).await;

    let anonymous = HttpSource::new(&server.url()).unwrap();
    assert!(matches!(anonymous.fetch_all().await, Err(Error::Unauthorized)));
    assert!(!anonymous.health_check().await);

    let authed = anonymous.with_token("s3cret");
    assert_eq!(authed.fetch_all().await.unwrap().len(), 7);
    assert_eq!(
        server.requests().last().unwrap().authorization.as_deref(),
        Some("Bearer s3cret")
    );
}

#[tokio::test]
async fn test_backend_failure_status() {
    let server = MockBackendServer::start_with(history(), today(), MockMode::Down, None).await;
    let source = HttpSource::new(&server.url()).unwrap();

    match source.fetch_all().await {
        Err(Error::Backend { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "backend down");
        }
        other => panic!("expected backend error, got {:?}", other.map(|t| t.len())),
    }
}

// =============================================================================
// Dashboard over HTTP
// =============================================================================

#[tokio::test]
async fn test_dashboard_over_http() {
    let server = MockBackendServer::start(history(), today()).await;
    let source = SourceClient::Http(HttpSource::new(&server.url()).unwrap());
    let dashboard = Dashboard::new(source).with_budgets(vec![BudgetLimit {
        category: "Groceries".to_string(),
        limit: 1200.0,
    }]);

    let view = dashboard.load(&march(), today()).await;

    let summary = view.summary.ready().unwrap();
    assert_eq!(summary.income, 250.0);
    assert_eq!(summary.expenses, 1500.0);
    assert_eq!(summary.savings, -1250.0);
    assert_eq!(summary.total_balance, summary.savings);

    let report = view.burn_rate.ready().unwrap();
    assert_eq!(report.average, 1000.0);
    let current = report.current_month.as_ref().unwrap();
    assert_eq!(current.value, 1500.0);
    assert_eq!(current.percentage_diff, 50.0);

    // Day 10: samples at 2, 4, 6, 8, 10
    let days: Vec<u32> = report.points.iter().filter_map(|p| p.day).collect();
    assert_eq!(days, [2, 4, 6, 8, 10]);

    let cards = view.budgets.ready().unwrap();
    assert_eq!(cards[0].spent, 1000.0);
}

#[tokio::test]
async fn test_dashboard_survives_feed_outage() {
    let server = MockBackendServer::start_with(history(), today(), MockMode::FeedDown, None).await;
    let source = SourceClient::Http(HttpSource::new(&server.url()).unwrap());

    let view = Dashboard::new(source).load(&march(), today()).await;

    assert!(view.summary.is_ready());
    let report = view.burn_rate.ready().unwrap();
    assert_eq!(report.buckets.len(), 4);
    assert_eq!(report.buckets[3].total_spent, 1500.0);
}

#[tokio::test]
async fn test_dashboard_backend_down() {
    let server = MockBackendServer::start_with(history(), today(), MockMode::Down, None).await;
    let source = SourceClient::Http(HttpSource::new(&server.url()).unwrap());

    let view = Dashboard::new(source).load(&march(), today()).await;

    assert!(matches!(view.summary, Section::Unavailable { .. }));
    assert!(matches!(view.burn_rate, Section::Unavailable { .. }));
    assert!(matches!(view.budgets, Section::Unavailable { .. }));
}
