//! Mock API gateway for integration tests
//!
//! Serves the generate-image resource and answers signed and unsigned
//! requests with independently configured replies

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use super::PNG_B64;

/// Resource path served by the mock
pub const GENERATE_PATH: &str = "/prod/generateImage";

/// How the gateway answers a request
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// `{ "images": [...], "prompt": ... }`
    Direct,
    /// `{ "statusCode": 200, "body": "<json string>" }`
    StringBody,
    /// `{ "body": { "images": [...] } }`
    ObjectBody,
    /// `{ "images": [] }`
    EmptyImages,
    /// Non-success status with a plain-text body
    Status(u16),
}

/// A request as the gateway saw it
#[derive(Debug, Clone)]
pub struct Received {
    pub signed: bool,
    pub security_token: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
}

pub struct MockGateway {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<GatewayState>,
}

struct GatewayState {
    signed_reply: Reply,
    unsigned_reply: Reply,
    signed_count: AtomicU32,
    unsigned_count: AtomicU32,
    received: Mutex<Vec<Received>>,
}

impl MockGateway {
    /// Start a gateway answering both kinds of request with `reply`
    pub async fn start(reply: Reply) -> anyhow::Result<Self> {
        Self::start_split(reply, reply).await
    }

    /// Start a gateway with separate replies for signed and unsigned requests
    pub async fn start_split(signed_reply: Reply, unsigned_reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(GatewayState {
            signed_reply,
            unsigned_reply,
            signed_count: AtomicU32::new(0),
            unsigned_count: AtomicU32::new(0),
            received: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route(GENERATE_PATH, routing::post(handle_generate))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Endpoint base URL, without the resource path
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of signed requests received
    pub fn signed_count(&self) -> u32 {
        self.state.signed_count.load(Ordering::Relaxed)
    }

    /// Number of unsigned requests received
    pub fn unsigned_count(&self) -> u32 {
        self.state.unsigned_count.load(Ordering::Relaxed)
    }

    /// Every request received so far, in arrival order
    pub fn received(&self) -> Vec<Received> {
        self.state.received.lock().unwrap().clone()
    }
}

impl Drop for MockGateway {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Base URL of a port with nothing listening
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn handle_generate(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let signed = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("AWS4-HMAC-SHA256"));

    let reply = if signed {
        state.signed_count.fetch_add(1, Ordering::Relaxed);
        state.signed_reply
    } else {
        state.unsigned_count.fetch_add(1, Ordering::Relaxed);
        state.unsigned_reply
    };

    let prompt = body["prompt"].as_str().unwrap_or_default().to_owned();

    state.received.lock().unwrap().push(Received {
        signed,
        security_token: headers
            .get("x-amz-security-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        headers,
        body,
    });

    match reply {
        Reply::Direct => Json(json!({ "images": [PNG_B64], "prompt": prompt })).into_response(),
        Reply::StringBody => {
            let inner = json!({ "images": [PNG_B64], "originalPrompt": prompt }).to_string();
            Json(json!({ "statusCode": 200, "body": inner })).into_response()
        }
        Reply::ObjectBody => Json(json!({
            "body": { "images": [PNG_B64], "translatedPrompt": format!("translated: {prompt}") }
        }))
        .into_response(),
        Reply::EmptyImages => Json(json!({ "images": [] })).into_response(),
        Reply::Status(code) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            "mock gateway failure",
        )
            .into_response(),
    }
}
