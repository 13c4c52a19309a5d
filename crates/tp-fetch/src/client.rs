//! HTTP client for the Polygon trades endpoint

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use tp_core::{ApiConfig, TradesResponse};

use crate::error::{FetchError, Result};
use crate::paginate::{PageQuery, PageSource};

/// Retry policy for page requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl From<&ApiConfig> for RetryConfig {
    fn from(api: &ApiConfig) -> Self {
        Self {
            max_retries: api.max_retries,
            initial_backoff: api.initial_backoff(),
            ..Default::default()
        }
    }
}

/// Polygon v2 trades client
pub struct PolygonClient {
    client: Client,
    base_url: String,
    api_key: String,
    retry: RetryConfig,
}

impl PolygonClient {
    pub fn new(api: &ApiConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(api.timeout())
            .user_agent(concat!("tickpack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            retry: RetryConfig::from(api),
        })
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Page URL without the API key, which is attached as a query parameter
    /// at send time so it never reaches the logs.
    pub fn page_url(&self, query: &PageQuery) -> String {
        let mut url = format!(
            "{}/{}/{}?limit={}",
            self.base_url, query.ticker, query.day, query.limit
        );
        if let Some(cursor) = query.cursor {
            url.push_str(&format!("&timestamp={cursor}"));
        }
        url
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<TradesResponse> {
        let mut last_error = FetchError::Connection("No attempts made".into());
        let mut backoff = self.retry.initial_backoff;

        for attempt in 0..=self.retry.max_retries {
            if attempt > 0 {
                debug!("Retry attempt {} after {:?}", attempt, backoff);
                tokio::time::sleep(backoff).await;
                backoff = Duration::from_secs_f64(
                    (backoff.as_secs_f64() * self.retry.multiplier)
                        .min(self.retry.max_backoff.as_secs_f64()),
                );
            }

            match self.fetch_once(url).await {
                Ok(page) => return Ok(page),
                Err(e) => {
                    if !e.is_retryable() {
                        return Err(e);
                    }
                    if let Some(retry_after) = e.retry_after() {
                        backoff = retry_after;
                    }
                    warn!("Page request failed (attempt {}): {}", attempt + 1, e);
                    last_error = e;
                }
            }
        }

        Err(FetchError::RetriesExhausted(last_error.to_string()))
    }

    async fn fetch_once(&self, url: &str) -> Result<TradesResponse> {
        let response = self
            .client
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;
        handle_response(response).await
    }
}

#[async_trait]
impl PageSource for PolygonClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<TradesResponse> {
        let url = self.page_url(query);
        debug!("Fetching: {}", url);
        self.fetch_with_retry(&url).await
    }
}

async fn handle_response(response: Response) -> Result<TradesResponse> {
    let status = response.status();
    match status {
        StatusCode::OK => {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        }

        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60)
                * 1000;
            Err(FetchError::RateLimited { retry_after_ms: retry_after })
        }

        _ => Err(FetchError::Http {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        }),
    }
}
