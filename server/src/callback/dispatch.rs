//! Callback Delivery
//!
//! Posts the interaction reply to the platform-supplied callback URL. One
//! attempt per interaction; failures are logged and go no further.

use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use super::error::CallbackError;
use super::ssrf;
use crate::interactions::types::InteractionResponse;

/// Delivers interaction replies to callback URLs.
#[derive(Debug, Clone)]
pub struct CallbackDispatcher {
    timeout: Duration,
    allow_private: bool,
}

impl CallbackDispatcher {
    /// Create a dispatcher. `allow_private` disables the SSRF address check.
    pub const fn new(timeout: Duration, allow_private: bool) -> Self {
        Self {
            timeout,
            allow_private,
        }
    }

    /// POST `response` as JSON to `url`. Returns the HTTP status on success.
    pub async fn deliver(
        &self,
        url: &str,
        response: &InteractionResponse,
    ) -> Result<u16, CallbackError> {
        let target = ssrf::resolve_callback_target(url, self.allow_private).await?;

        // Pin the verified address so DNS cannot change between check and send.
        let client = reqwest::Client::builder()
            .resolve(&target.host, target.addr)
            .timeout(self.timeout)
            .build()?;

        let resp = client.post(target.url).json(response).send().await?;

        let status = resp.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(CallbackError::Status(status.as_u16()))
        }
    }

    /// Deliver and log the outcome. Never fails; meant to run as a
    /// background task.
    pub async fn deliver_and_log(self, url: String, response: InteractionResponse) {
        let start = Instant::now();
        let result = self.deliver(&url, &response).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(status) => {
                info!(url = %url, status, latency_ms, "Callback delivered");
            }
            Err(
                e @ (CallbackError::PrivateAddress { .. }
                | CallbackError::BlockedHost(_)
                | CallbackError::UnsupportedScheme(_)),
            ) => {
                warn!(url = %url, error = %e, "Callback delivery blocked by SSRF protection");
            }
            Err(e) => {
                error!(url = %url, latency_ms, error = %e, "Callback delivery failed");
            }
        }
    }
}
