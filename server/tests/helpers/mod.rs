//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full axum router,
//! plus utilities for signing interaction payloads.
//!
//! ## Fake Upstreams
//!
//! Use [`spawn_fake_coingecko()`] for a local price API that records which token
//! ids were requested, and [`spawn_callback_recorder()`] for a callback receiver
//! that stores every delivered body.
//!
//! ## Test Servers
//!
//! Use [`spawn_test_server()`] when a test needs a real socket instead of
//! `tower::ServiceExt::oneshot`.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{self, Method, Request, Response, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use token_tracker_server::api::{create_router, AppState};
use token_tracker_server::auth::signature::sign_payload;
use token_tracker_server::auth::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use token_tracker_server::config::Config;
use tower::ServiceExt;

/// Path of the signed interaction endpoint.
pub const INTERACTIONS_PATH: &str = "/token-tracker/interactions";

// ============================================================================
// Test App
// ============================================================================

/// A test application wrapping the full axum router.
pub struct TestApp {
    pub router: Router,
    pub config: Arc<Config>,
}

impl TestApp {
    /// Create a new test app with the default test config.
    pub fn new() -> Self {
        Self::with_config(Config::default_for_test())
    }

    /// Create a test app with a custom config (for upstream wiring).
    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(config.clone()).expect("Failed to build app state");
        let router = create_router(state);

        Self {
            router,
            config: Arc::new(config),
        }
    }

    /// Create a test app whose price API is the given fake server.
    pub fn with_price_api(url: &str) -> Self {
        let mut config = Config::default_for_test();
        config.coingecko_api_url = url.to_string();
        Self::with_config(config)
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Build a correctly signed interaction request for `payload`.
    pub fn signed_interaction(&self, payload: &Value) -> Request<Body> {
        signed_request(payload, &self.config.signing_secret)
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }
}

// ============================================================================
// Signing helpers
// ============================================================================

/// Current unix time in seconds, as sent in `X-Signature-Timestamp`.
pub fn now_timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

/// Sign `payload` with `secret` at the current time.
pub fn signed_request(payload: &Value, secret: &str) -> Request<Body> {
    let body = serde_json::to_vec(payload).expect("payload serializes");
    let timestamp = now_timestamp();
    let signature = sign_payload(secret, &timestamp, &body);
    raw_interaction_request(body, Some(&signature), Some(&timestamp))
}

/// Build an interaction request with explicit (possibly broken) signature headers.
pub fn raw_interaction_request(
    body: Vec<u8>,
    signature: Option<&str>,
    timestamp: Option<&str>,
) -> Request<Body> {
    let mut builder = TestApp::request(Method::POST, INTERACTIONS_PATH)
        .header("Content-Type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header(SIGNATURE_HEADER, signature);
    }
    if let Some(timestamp) = timestamp {
        builder = builder.header(TIMESTAMP_HEADER, timestamp);
    }
    builder.body(Body::from(body)).expect("valid request")
}

/// A `/token-tracker` chat-input interaction asking for `token_name`.
pub fn token_interaction(token_name: &str, callback_url: Option<&str>) -> Value {
    let mut payload = json!({
        "id": "interaction-1",
        "type": 2,
        "data": {
            "id": "command-1",
            "name": "token-tracker",
            "options": [
                { "name": "token-name", "type": 3, "value": token_name }
            ]
        }
    });
    if let Some(url) = callback_url {
        payload["actionContext"] = json!({ "callbackUrl": url });
    }
    payload
}

// ============================================================================
// Test Server
// ============================================================================

/// A running test server bound to a random port.
pub struct TestServer {
    /// Server address (127.0.0.1:PORT).
    pub addr: SocketAddr,
    /// Base URL for HTTP requests (e.g., `http://127.0.0.1:12345`).
    pub url: String,
    /// Handle to the server task for cleanup.
    _handle: JoinHandle<()>,
}

/// Spawn a real HTTP server on a random port.
pub async fn spawn_test_server(router: Router) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let url = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    TestServer {
        addr,
        url,
        _handle: handle,
    }
}

// ============================================================================
// Fake price API
// ============================================================================

/// Shared log of `ids` values the fake price API was asked for.
pub type RequestedIds = Arc<Mutex<Vec<String>>>;

/// A fake price API and the record of its market data requests.
pub struct FakeCoinGecko {
    pub server: TestServer,
    pub requested_ids: RequestedIds,
}

impl FakeCoinGecko {
    /// Snapshot of the requested token ids so far.
    pub fn requested_ids(&self) -> Vec<String> {
        self.requested_ids.lock().expect("lock poisoned").clone()
    }
}

/// Sample market record for Ethereum.
pub fn ethereum_market_record() -> Value {
    json!({
        "id": "ethereum",
        "symbol": "eth",
        "name": "Ethereum",
        "current_price": 3250.5,
        "market_cap": 390000000000.0,
        "market_cap_rank": 2,
        "high_24h": 3300.0,
        "low_24h": 3100.0,
        "price_change_24h": 45.25,
        "price_change_percentage_24h": 1.41,
        "circulating_supply": 120000000.0,
        "total_supply": 120000000.0,
        "max_supply": null,
        "ath": 4878.26,
        "ath_change_percentage": -33.4,
        "ath_date": "2021-11-10T14:24:19.604Z",
        "atl": 0.432979,
        "atl_change_percentage": 750000.0,
        "atl_date": "2015-10-20T00:00:00.000Z",
        "roi": { "times": 85.2, "currency": "btc", "percentage": 8520.0 },
        "last_updated": "2026-10-18T12:00:00.000Z"
    })
}

async fn fake_coins_list() -> Json<Value> {
    Json(json!([
        { "id": "mystery-token", "symbol": null, "name": null },
        { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin" },
        { "id": "ethereum", "symbol": "eth", "name": "Ethereum" },
        { "id": "tether", "symbol": "usdt", "name": "Tether" }
    ]))
}

async fn fake_coins_markets(
    State(requested): State<RequestedIds>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let ids = params.get("ids").cloned().unwrap_or_default();
    requested.lock().expect("lock poisoned").push(ids.clone());

    if ids == "ethereum" {
        Json(json!([ethereum_market_record()]))
    } else {
        Json(json!([]))
    }
}

/// Spawn a fake price API serving a small registry and Ethereum market data.
pub async fn spawn_fake_coingecko() -> FakeCoinGecko {
    let requested_ids = RequestedIds::default();
    let router = Router::new()
        .route("/coins/list", get(fake_coins_list))
        .route("/coins/markets", get(fake_coins_markets))
        .with_state(requested_ids.clone());

    FakeCoinGecko {
        server: spawn_test_server(router).await,
        requested_ids,
    }
}

/// Spawn a price API that answers every request with 500.
pub async fn spawn_failing_coingecko() -> TestServer {
    let router = Router::new().fallback(|| async {
        (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
    });
    spawn_test_server(router).await
}

// ============================================================================
// Callback recorder
// ============================================================================

/// A callback receiver and the bodies delivered to it.
pub struct CallbackRecorder {
    pub server: TestServer,
    pub received: Arc<Mutex<Vec<Value>>>,
}

impl CallbackRecorder {
    /// URL to put in `actionContext.callbackUrl`.
    pub fn url(&self) -> String {
        format!("{}/callback", self.server.url)
    }

    /// Poll until at least `count` callbacks arrived or `timeout` elapses.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Vec<Value> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let received = self.received.lock().expect("lock poisoned").clone();
            if received.len() >= count || tokio::time::Instant::now() >= deadline {
                return received;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

async fn record_callback(
    State(received): State<Arc<Mutex<Vec<Value>>>>,
    Json(body): Json<Value>,
) -> StatusCode {
    received.lock().expect("lock poisoned").push(body);
    StatusCode::NO_CONTENT
}

/// Spawn a server that records every JSON body POSTed to `/callback`.
pub async fn spawn_callback_recorder() -> CallbackRecorder {
    let received = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/callback", post(record_callback))
        .with_state(received.clone());

    CallbackRecorder {
        server: spawn_test_server(router).await,
        received,
    }
}

// ============================================================================
// Response helpers
// ============================================================================

/// Collect a response body and parse it as JSON.
pub async fn body_to_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
