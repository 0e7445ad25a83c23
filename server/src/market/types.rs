//! Price API Types
//!
//! Records returned by the CoinGecko `coins/list` and `coins/markets`
//! endpoints. Every market field is optional: absent and `null` both decode
//! to `None`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// Entry of the token registry (`GET /coins/list`).
///
/// Missing or `null` fields decode to an empty string so one odd entry does
/// not fail the whole registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl TokenRecord {
    /// Build a record from borrowed parts.
    pub fn new(id: &str, symbol: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            symbol: symbol.to_owned(),
            name: name.to_owned(),
        }
    }
}

/// Per-token market snapshot (`GET /coins/markets`).
///
/// `max_supply` and the ROI numbers are kept as [`Number`] so they render
/// exactly as the API sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketRecord {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u64>,
    pub fully_diluted_valuation: Option<f64>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub market_cap_change_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<Number>,
    pub ath: Option<f64>,
    pub ath_change_percentage: Option<f64>,
    pub atl: Option<f64>,
    pub atl_change_percentage: Option<f64>,
    pub roi: Option<Roi>,
}

/// Return-on-investment sub-record; only some tokens carry one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roi {
    pub times: Option<Number>,
    pub currency: Option<String>,
    pub percentage: Option<Number>,
}
