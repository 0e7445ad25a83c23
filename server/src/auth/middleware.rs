//! Signature Verification Middleware

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::api::AppState;

use super::error::AuthError;
use super::signature::{decode_signature, timestamp_within, verify_signature};

/// Header carrying the hex HMAC-SHA256 signature.
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Header carrying the unix timestamp (seconds) that was signed with the body.
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Largest interaction body accepted for verification.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Middleware to require a valid request signature.
///
/// Buffers the body, checks `X-Signature` against `timestamp || body` using
/// the configured signing secret, then hands the request on with the body
/// restored.
///
/// # Usage
///
/// ```ignore
/// Router::new()
///     .route("/interactions", post(handler))
///     .layer(axum::middleware::from_fn_with_state(state, require_signature))
/// ```
pub async fn require_signature(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let headers = request.headers();

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingSignature)?;
    let signature = decode_signature(signature).ok_or(AuthError::InvalidSignature)?;

    let timestamp = headers
        .get(TIMESTAMP_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingTimestamp)?
        .to_owned();
    let signed_at: i64 = timestamp
        .trim()
        .parse()
        .map_err(|_| AuthError::InvalidTimestamp)?;

    let now = chrono::Utc::now().timestamp();
    if !timestamp_within(signed_at, now, state.config.signature_max_age_secs) {
        warn!(signed_at, now, "Rejected interaction with stale signature timestamp");
        return Err(AuthError::StaleTimestamp);
    }

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| AuthError::InvalidBody)?;

    if !verify_signature(&state.config.signing_secret, &timestamp, &bytes, &signature) {
        warn!(path = %parts.uri.path(), "Rejected interaction with mismatched signature");
        return Err(AuthError::SignatureMismatch);
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}
