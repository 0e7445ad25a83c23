//! Token Tracker Interaction Handlers

use axum::{extract::State, Json};
use tracing::{debug, info, instrument, warn};

use super::manifest::{token_tracker_metadata, Metadata, COMMAND_NAME, TOKEN_NAME_OPTION};
use super::options::get_option_str;
use super::types::{Interaction, InteractionResponse, InteractionType};
use crate::api::AppState;
use crate::market::{format_market_response, resolve_token_id, CoinGeckoClient, MarketError};
use crate::tasks::BackgroundTasks;

/// Reply when the price API could not be reached or answered badly.
pub const UNAVAILABLE_MESSAGE: &str = "Token data is temporarily unavailable. Please try again later.";

/// Reply for interaction types or commands this action does not serve.
pub const UNSUPPORTED_MESSAGE: &str = "Unsupported interaction.";

/// Reply when no registry entry matches the requested token.
pub fn not_found_message(token_name: Option<&str>) -> String {
    format!("no data found with {}", token_name.unwrap_or("token"))
}

/// `GET /token-tracker/metadata`
pub async fn get_metadata() -> Json<Metadata> {
    Json(token_tracker_metadata())
}

/// `POST /token-tracker/interactions`
///
/// Always answers with an acknowledgment. The same reply is queued for
/// delivery to the callback URL once the acknowledgment has been sent.
#[instrument(skip_all, fields(interaction_id = tracing::field::Empty))]
pub async fn post_interaction(
    State(state): State<AppState>,
    tasks: BackgroundTasks,
    Json(interaction): Json<Interaction>,
) -> Json<InteractionResponse> {
    if let Some(id) = interaction.id.as_deref() {
        tracing::Span::current().record("interaction_id", id);
    }

    let response = handle_interaction(&state.market, &interaction).await;

    match interaction.callback_url() {
        Some(url) if response.data.is_some() => {
            let dispatcher = state.callbacks.clone();
            tasks.add(
                "interaction-callback",
                dispatcher.deliver_and_log(url.to_owned(), response.clone()),
            );
        }
        Some(_) => {}
        None => debug!("Interaction has no callback URL, skipping callback delivery"),
    }

    Json(response)
}

/// Compute the reply for one interaction.
pub async fn handle_interaction(
    market: &CoinGeckoClient,
    interaction: &Interaction,
) -> InteractionResponse {
    match interaction.kind {
        Some(InteractionType::Ping) => return InteractionResponse::pong(),
        Some(InteractionType::ApplicationCommand) | None => {}
        Some(InteractionType::Other(kind)) => {
            warn!(kind, "Unsupported interaction type");
            return InteractionResponse::ephemeral_message(UNSUPPORTED_MESSAGE);
        }
    }

    if let Some(name) = interaction.command_name() {
        if name != COMMAND_NAME {
            warn!(command = name, "Unsupported command");
            return InteractionResponse::ephemeral_message(UNSUPPORTED_MESSAGE);
        }
    }

    let token_name = get_option_str(interaction, TOKEN_NAME_OPTION);
    let content = match lookup_token(market, token_name).await {
        Ok(content) => content,
        Err(e) => {
            warn!(
                token_name = token_name.unwrap_or_default(),
                timeout = e.is_timeout(),
                error = %e,
                "Price API lookup failed"
            );
            UNAVAILABLE_MESSAGE.to_string()
        }
    };

    InteractionResponse::ephemeral_message(content)
}

/// Resolve `token_name` against the registry and format its market data.
///
/// A token that matches nothing yields the not-found message without a
/// market data request.
pub async fn lookup_token(
    market: &CoinGeckoClient,
    token_name: Option<&str>,
) -> Result<String, MarketError> {
    let registry = market.list_tokens().await?;

    let Some(token_id) = resolve_token_id(token_name, &registry) else {
        info!(token_name = token_name.unwrap_or_default(), "Token not found in registry");
        return Ok(not_found_message(token_name));
    };

    debug!(token_id, "Resolved token");
    let response = market.fetch_markets(token_id).await?;
    format_market_response(&response)
}
