//! Callback Delivery Errors

use std::net::IpAddr;

use thiserror::Error;

/// Reasons a callback delivery did not succeed.
#[derive(Error, Debug)]
pub enum CallbackError {
    #[error("Invalid callback URL: {0}")]
    InvalidUrl(String),
    #[error("Unsupported callback URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Callback host is blocked: {0}")]
    BlockedHost(String),
    #[error("Callback host {host} resolves to private address {ip}")]
    PrivateAddress { host: String, ip: IpAddr },
    #[error("DNS resolution failed for {host}: {reason}")]
    Resolve { host: String, reason: String },
    #[error("Callback request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Callback endpoint returned HTTP {0}")]
    Status(u16),
}
