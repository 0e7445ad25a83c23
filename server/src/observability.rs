//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::ServerEnv;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "token_tracker_server=debug,tower_http=debug";

/// Install the global subscriber: JSON lines in production, human-readable
/// output in development.
pub fn init_tracing(server_env: ServerEnv) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if server_env.is_production() {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}
