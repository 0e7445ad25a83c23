//! Token Market Data
//!
//! Token registry lookup, market data fetch and message formatting against
//! the CoinGecko v3 API.

pub mod client;
pub mod error;
pub mod format;
pub mod resolver;
pub mod types;

pub use client::CoinGeckoClient;
pub use error::MarketError;
pub use format::{format_market_record, format_market_response, EMPTY_RESPONSE_MESSAGE};
pub use resolver::resolve_token_id;
pub use types::{MarketRecord, Roi, TokenRecord};
