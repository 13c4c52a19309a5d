pub mod config;
pub mod error;
pub mod types;

pub use config::{ApiConfig, TickpackConfig};
pub use error::{Result, TpError};
pub use types::{Trade, TradeDay, TradesResponse};
