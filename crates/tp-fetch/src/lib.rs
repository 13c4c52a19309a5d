//! Trade retrieval: Polygon trades client and cursor pagination over a day.

pub mod client;
pub mod error;
pub mod paginate;

pub use client::{PolygonClient, RetryConfig};
pub use error::{FetchError, Result};
pub use paginate::{collect_day, fetch_day_json, PageQuery, PageSource};
