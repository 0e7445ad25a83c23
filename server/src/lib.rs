//! Token Tracker Server
//!
//! Slash-command action backend: verifies signed interactions, looks up
//! token market data on CoinGecko, and replies both synchronously and via
//! the platform's callback URL.

pub mod api;
pub mod auth;
pub mod callback;
pub mod config;
pub mod interactions;
pub mod market;
pub mod observability;
pub mod tasks;
