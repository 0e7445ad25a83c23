//! Price API Error Types

use thiserror::Error;

/// Failures talking to the price API or decoding its responses.
#[derive(Error, Debug)]
pub enum MarketError {
    /// Transport failure, including timeouts.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-2xx response.
    #[error("Unexpected HTTP status {status} from {endpoint}")]
    Status { endpoint: &'static str, status: u16 },
    /// Body was not the expected JSON.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl MarketError {
    /// Whether the failure was a client-side timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }
}
