//! API Router and Application State
//!
//! Central routing configuration and shared state.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{callback::CallbackDispatcher, config::Config, interactions, market::CoinGeckoClient};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Price API client
    pub market: CoinGeckoClient,
    /// Callback delivery
    pub callbacks: CallbackDispatcher,
    /// Process start, for the health check
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let market = CoinGeckoClient::new(&config.coingecko_api_url, config.upstream_timeout())?;
        let callbacks =
            CallbackDispatcher::new(config.callback_timeout(), config.allow_private_callbacks);

        Ok(Self {
            config: Arc::new(config),
            market,
            callbacks,
            started_at: Instant::now(),
        })
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/", get(health_check))
        // Slash command action
        .nest("/token-tracker", interactions::router(state.clone()))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Always true while the process serves requests
    success: bool,
    /// Seconds since startup
    uptime: f64,
    /// Current server time (RFC 3339)
    timestamp: String,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
