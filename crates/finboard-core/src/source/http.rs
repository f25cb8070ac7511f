//! Backend service source
//!
//! Talks to the transaction backend's REST API:
//! - `GET /api/transactions?page&size&category&sort&dir` (paged)
//! - `GET /api/analytics/burn-rate?startDate&endDate` (monthly feed)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::error::{Error, Result};
use crate::models::{BurnRateEntry, DateRange, Page, PageQuery, Transaction};

use super::TransactionSource;

/// Upper bound on pages walked by `fetch_all`
const MAX_PAGES: u32 = 1000;

/// HTTP client for the backend service
#[derive(Clone)]
pub struct HttpSource {
    http_client: Client,
    base_url: String,
    token: Option<String>,
    /// Page size used by `fetch_all`
    page_size: u32,
}

impl HttpSource {
    /// Create a source for `base_url` with default settings
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, None, 10_000, Duration::from_secs(30))
    }

    /// Create from the `[backend]` config section
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::build(
            &config.url,
            config.token.as_deref(),
            config.fetch_all_size,
            config.timeout,
        )
    }

    fn build(base_url: &str, token: Option<&str>, page_size: u32, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
            page_size: page_size.max(1),
        })
    }

    /// Create a new instance sending a different bearer token
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.to_string()),
            page_size: self.page_size,
        }
    }

    /// Create a new instance with a different `fetch_all` page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, ?query, "Backend request");

        let mut req_builder = self.http_client.get(&url).query(query);
        if let Some(ref token) = self.token {
            req_builder = req_builder.bearer_auth(token);
        }

        let response = req_builder.send().await?;
        check_status(response).await
    }
}

/// Map non-success responses to errors: 401/403 mean the credentials were
/// rejected, anything else is a backend failure
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        warn!(status = %status, "Backend rejected credentials");
        return Err(Error::Unauthorized);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Backend {
        status: status.as_u16(),
        message: if body.is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            body
        },
    })
}

fn page_params(query: &PageQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", query.page.to_string()),
        ("size", query.size.to_string()),
        ("sort", query.sort.as_str().to_string()),
        ("dir", query.dir.as_str().to_string()),
    ];
    if let Some(category) = query.category_filter() {
        params.push(("category", category.to_string()));
    }
    params
}

#[async_trait]
impl TransactionSource for HttpSource {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page<Transaction>> {
        let response = self.get("/api/transactions", &page_params(query)).await?;
        let page: Page<Transaction> = response.json().await?;
        debug!(
            count = page.content.len(),
            total = page.total_elements,
            "Fetched transaction page"
        );
        Ok(page)
    }

    async fn fetch_all(&self) -> Result<Vec<Transaction>> {
        let mut query = PageQuery {
            size: self.page_size,
            ..PageQuery::default()
        };
        let mut all = Vec::new();

        loop {
            let page = self.fetch_page(&query).await?;
            let fetched = page.content.len();
            all.extend(page.content);

            let last_page = page.total_pages == 0 || query.page + 1 >= page.total_pages;
            if last_page || fetched == 0 || query.page + 1 >= MAX_PAGES {
                break;
            }
            query.page += 1;
        }

        debug!(count = all.len(), pages = query.page + 1, "Fetched all transactions");
        Ok(all)
    }

    async fn fetch_burn_rate(&self, range: Option<&DateRange>) -> Result<Vec<BurnRateEntry>> {
        let params: Vec<(&str, String)> = match range {
            Some(r) => vec![
                ("startDate", r.from.format("%Y-%m-%d").to_string()),
                ("endDate", r.to.format("%Y-%m-%d").to_string()),
            ],
            None => Vec::new(),
        };

        let response = self.get("/api/analytics/burn-rate", &params).await?;
        let entries: Vec<BurnRateEntry> = response.json().await?;
        debug!(months = entries.len(), "Fetched burn-rate feed");
        Ok(entries)
    }

    async fn health_check(&self) -> bool {
        let query = PageQuery {
            size: 1,
            ..PageQuery::default()
        };
        match self.get("/api/transactions", &page_params(&query)).await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Backend health check failed");
                false
            }
        }
    }

    fn name(&self) -> String {
        format!("backend ({})", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SortDirection, SortField};

    #[test]
    fn test_page_params_skip_all_category() {
        let query = PageQuery {
            page: 2,
            size: 25,
            category: Some("All".to_string()),
            sort: SortField::Amount,
            dir: SortDirection::Asc,
        };
        let params = page_params(&query);
        assert!(params.contains(&("page", "2".to_string())));
        assert!(params.contains(&("sort", "amount".to_string())));
        assert!(params.contains(&("dir", "asc".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "category"));
    }

    #[test]
    fn test_page_params_with_category() {
        let query = PageQuery {
            category: Some("Dining".to_string()),
            ..PageQuery::default()
        };
        assert!(page_params(&query).contains(&("category", "Dining".to_string())));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let source = HttpSource::new("http://localhost:8080/").unwrap();
        assert_eq!(source.base_url(), "http://localhost:8080");
        assert_eq!(source.name(), "backend (http://localhost:8080)");
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        let source = HttpSource::new("http://127.0.0.1:1").unwrap();
        assert!(!source.health_check().await);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_source_unavailable() {
        let source = HttpSource::new("http://127.0.0.1:1").unwrap();
        let err = source.fetch_all().await.unwrap_err();
        assert!(err.is_source_unavailable());
    }
}
