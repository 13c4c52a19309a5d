//! Cursor pagination over one trading day.
//!
//! The trades endpoint returns at most `limit` records per page. A full page
//! means there may be more: the next page starts one nanosecond after the
//! last record's SIP timestamp so no trade is returned twice. The first page
//! shorter than `limit` ends the day.

use async_trait::async_trait;
use tracing::{debug, info};

use tp_core::{TradeDay, TradesResponse};

use crate::error::{FetchError, Result};

/// Parameters for one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub ticker: String,
    pub day: TradeDay,
    /// Lowest SIP timestamp to return; `None` for the first page.
    pub cursor: Option<i64>,
    pub limit: usize,
}

/// Anything that can serve one page of trades.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> Result<TradesResponse>;
}

/// Fetch every page of `ticker` on `day` and merge them into one response.
///
/// Counts and records accumulate across pages; `ticker` and `map` come from
/// the final page.
pub async fn collect_day<S>(source: &S, ticker: &str, day: TradeDay, limit: usize) -> Result<TradesResponse>
where
    S: PageSource + ?Sized,
{
    let mut merged = TradesResponse::default();
    let mut query = PageQuery { ticker: ticker.to_string(), day, cursor: None, limit };
    let mut pages = 0usize;

    loop {
        let mut page = source.fetch_page(&query).await?;
        pages += 1;
        let count = page.result_count;
        let last = page.last_timestamp();
        merged.absorb(&mut page);
        debug!(page = pages, count, total = merged.result_count, cursor = ?query.cursor, "page merged");

        if count < limit {
            merged.finish_with(page);
            break;
        }

        let next = match last {
            Some(t) => t + 1,
            None => return Err(FetchError::Stalled { cursor: query.cursor }),
        };
        if query.cursor.is_some_and(|c| next <= c) {
            return Err(FetchError::Stalled { cursor: query.cursor });
        }
        query.cursor = Some(next);
    }

    info!(ticker, %day, pages, trades = merged.result_count, "day collected");
    Ok(merged)
}

/// [`collect_day`] serialized to JSON, ready for the codec.
pub async fn fetch_day_json<S>(source: &S, ticker: &str, day: TradeDay, limit: usize) -> Result<Vec<u8>>
where
    S: PageSource + ?Sized,
{
    let merged = collect_day(source, ticker, day, limit).await?;
    Ok(serde_json::to_vec(&merged)?)
}
