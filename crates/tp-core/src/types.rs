use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TpError;

/// One day of trades for a ticker, as returned by a single page of the trades
/// endpoint or as merged across every page of the day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradesResponse {
    #[serde(default)]
    pub ticker: String,
    #[serde(rename = "results_count", default)]
    pub result_count: usize,
    #[serde(default)]
    pub results: Vec<Trade>,
    /// Field legend sent by the API; passed through untouched.
    #[serde(rename = "map", default)]
    pub key_map: serde_json::Value,
}

impl TradesResponse {
    /// Append a page's records and count.
    pub fn absorb(&mut self, page: &mut TradesResponse) {
        self.result_count += page.result_count;
        self.results.append(&mut page.results);
    }

    /// Copy the static fields from the final page of the day.
    pub fn finish_with(&mut self, page: TradesResponse) {
        self.ticker = page.ticker;
        self.key_map = page.key_map;
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.results.last().map(|t| t.timestamp)
    }
}

/// A single trade record. Field order matches the wire order so that a merged
/// day serializes with the same layout the compaction table was tuned on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(rename = "I", default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<i64>,
    #[serde(rename = "x")]
    pub exchange_id: i64,
    #[serde(rename = "p")]
    pub price: f64,
    #[serde(rename = "i")]
    pub trade_id: String,
    #[serde(rename = "e", default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<i64>,
    #[serde(rename = "r", default, skip_serializing_if = "Option::is_none")]
    pub reporting_id: Option<i64>,
    /// SIP timestamp, nanoseconds since the epoch.
    #[serde(rename = "t")]
    pub timestamp: i64,
    #[serde(rename = "y")]
    pub exchange_time: i64,
    #[serde(rename = "f", default, skip_serializing_if = "Option::is_none")]
    pub reporting_time: Option<i64>,
    #[serde(rename = "q")]
    pub sequence: i64,
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<i64>>,
    #[serde(rename = "s")]
    pub size: i64,
    #[serde(rename = "z")]
    pub tape: i64,
}

/// A validated `YYYY-MM-DD` trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TradeDay(NaiveDate);

impl TradeDay {
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for TradeDay {
    type Err = TpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| TpError::InvalidDay(s.to_string()))?;
        if !(1900..=2099).contains(&date.year()) {
            return Err(TpError::InvalidDay(s.to_string()));
        }
        Ok(Self(date))
    }
}

impl fmt::Display for TradeDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
