//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Default CoinGecko v3 base URL.
pub const DEFAULT_COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Deployment environment selected by `SERVER_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerEnv {
    /// `SERVER_ENV=production`
    Production,
    /// Anything else, including unset.
    Development,
}

impl ServerEnv {
    /// Parse the `SERVER_ENV` value. Only `production` selects production.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000")
    pub bind_address: String,

    /// Production vs. development behavior
    pub server_env: ServerEnv,

    /// HMAC secret shared with the action platform
    pub signing_secret: String,

    /// Maximum accepted age of `X-Signature-Timestamp` in seconds (default: 300)
    pub signature_max_age_secs: i64,

    /// Base URL of the price API (no trailing slash)
    pub coingecko_api_url: String,

    /// Timeout for token registry and market data requests in seconds (default: 10)
    pub upstream_timeout_secs: u64,

    /// Timeout for callback delivery in seconds (default: 10)
    pub callback_timeout_secs: u64,

    /// Allow callback URLs that resolve to private/reserved addresses
    pub allow_private_callbacks: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server_env = ServerEnv::parse(env::var("SERVER_ENV").ok().as_deref());

        let port: u16 = match env::var("PORT") {
            Ok(v) => v.parse().with_context(|| format!("PORT is not a valid port: {v}"))?,
            Err(_) => 3000,
        };

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| format!("0.0.0.0:{port}")),
            server_env,
            signing_secret: env::var("ACTION_SIGNING_SECRET")
                .context("ACTION_SIGNING_SECRET must be set")?,
            signature_max_age_secs: env::var("SIGNATURE_MAX_AGE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            coingecko_api_url: env::var("COINGECKO_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_COINGECKO_API_URL.into()),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            callback_timeout_secs: env::var("CALLBACK_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            allow_private_callbacks: env::var("ALLOW_PRIVATE_CALLBACKS")
                .ok()
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(!server_env.is_production()),
        })
    }

    /// Timeout applied to both registry and market data requests.
    #[must_use]
    pub const fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Timeout applied to callback delivery.
    #[must_use]
    pub const fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.callback_timeout_secs)
    }

    /// Create a default configuration for testing.
    ///
    /// Points the price API at an unroutable address; integration tests
    /// override `coingecko_api_url` with a local fake server.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".into(),
            server_env: ServerEnv::Development,
            signing_secret: "test-signing-secret".into(),
            signature_max_age_secs: 300,
            coingecko_api_url: "http://127.0.0.1:9".into(),
            upstream_timeout_secs: 2,
            callback_timeout_secs: 2,
            allow_private_callbacks: true,
        }
    }
}
