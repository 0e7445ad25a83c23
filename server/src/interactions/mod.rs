//! Token Tracker Interactions
//!
//! The `/token-tracker` slash command: manifest, signed interaction
//! endpoint, and the wire types both share.

pub mod handlers;
pub mod manifest;
pub mod options;
pub mod types;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};

use crate::api::AppState;
use crate::auth::require_signature;
use crate::tasks::run_after_response;

/// Create the token tracker router (mounted at `/token-tracker`).
///
/// - GET /metadata - Action manifest
/// - POST /interactions - Signed interaction endpoint
pub fn router(state: AppState) -> Router<AppState> {
    let interactions = Router::new()
        .route("/interactions", post(handlers::post_interaction))
        .layer(from_fn(run_after_response))
        .layer(from_fn_with_state(state, require_signature));

    Router::new()
        .route("/metadata", get(handlers::get_metadata))
        .merge(interactions)
}
