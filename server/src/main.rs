//! Token Tracker Server - Main Entry Point

use anyhow::Result;
use tracing::info;

use token_tracker_server::{api, config, observability};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    // Initialize tracing
    observability::init_tracing(config.server_env);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = ?config.server_env,
        price_api = %config.coingecko_api_url,
        "Starting Token Tracker Server"
    );

    // Build application state
    let state = api::AppState::new(config.clone())?;

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
