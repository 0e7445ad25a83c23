//! CoinGecko Client
//!
//! Thin wrapper over `reqwest` for the two endpoints the tracker needs.
//! Every call is bounded by the configured upstream timeout.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument};

use super::error::MarketError;
use super::types::TokenRecord;

/// Quote currency for market data.
pub const VS_CURRENCY: &str = "usd";

/// Client for the CoinGecko v3 API.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    /// Create a client for `base_url` (e.g. `https://api.coingecko.com/api/v3`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MarketError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("token-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full token registry (`GET /coins/list`).
    #[instrument(skip(self))]
    pub async fn list_tokens(&self) -> Result<Vec<TokenRecord>, MarketError> {
        let body = self
            .get_text("coins/list", &format!("{}/coins/list", self.base_url), &[])
            .await?;
        let tokens: Vec<TokenRecord> = serde_json::from_str(&body)?;
        debug!(count = tokens.len(), "Fetched token registry");
        Ok(tokens)
    }

    /// Fetch the USD market snapshot for one token id (`GET /coins/markets`).
    ///
    /// Returns the decoded JSON untouched; see
    /// [`format_market_response`](super::format::format_market_response).
    #[instrument(skip(self))]
    pub async fn fetch_markets(&self, token_id: &str) -> Result<Value, MarketError> {
        let body = self
            .get_text(
                "coins/markets",
                &format!("{}/coins/markets", self.base_url),
                &[("vs_currency", VS_CURRENCY), ("ids", token_id)],
            )
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_text(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String, MarketError> {
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
