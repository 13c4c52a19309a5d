use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, TpError};

pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io/v2/ticks/stocks/trades";
/// Largest page the trades endpoint will return.
pub const DEFAULT_PAGE_LIMIT: usize = 50_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickpackConfig {
    pub api: ApiConfig,
    pub ticker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub page_limit: usize,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

impl Default for TickpackConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.into(),
                page_limit: DEFAULT_PAGE_LIMIT,
                timeout_secs: 30,
                max_retries: 3,
                initial_backoff_ms: 500,
            },
            ticker: "AAPL".into(),
        }
    }
}

impl TickpackConfig {
    /// Defaults overridden by `TICKPACK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api: ApiConfig {
                base_url: lookup("TICKPACK_BASE_URL").unwrap_or(defaults.api.base_url),
                page_limit: parse_var(&lookup, "TICKPACK_PAGE_LIMIT")
                    .unwrap_or(defaults.api.page_limit),
                timeout_secs: parse_var(&lookup, "TICKPACK_TIMEOUT_SECS")
                    .unwrap_or(defaults.api.timeout_secs),
                max_retries: parse_var(&lookup, "TICKPACK_MAX_RETRIES")
                    .unwrap_or(defaults.api.max_retries),
                initial_backoff_ms: parse_var(&lookup, "TICKPACK_BACKOFF_MS")
                    .unwrap_or(defaults.api.initial_backoff_ms),
            },
            ticker: lookup("TICKPACK_TICKER").unwrap_or(defaults.ticker),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(TpError::InvalidConfig("base_url must not be empty".into()));
        }
        if self.api.page_limit == 0 {
            return Err(TpError::InvalidConfig("page_limit must be positive".into()));
        }
        if self.ticker.trim().is_empty() {
            return Err(TpError::InvalidConfig("ticker must not be empty".into()));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}
