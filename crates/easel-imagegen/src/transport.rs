mod direct;
mod signed;

use async_trait::async_trait;
use easel_core::Credentials;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

pub use direct::DirectTransport;
pub use signed::SignedTransport;

/// Fully resolved destination of a generation request
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    /// Endpoint base URL joined with the resource path
    pub url: &'a str,
    /// Region used for signing
    pub region: &'a str,
    /// Extra headers configured for the endpoint
    pub headers: &'a IndexMap<String, String>,
}

/// Failure of a single delivery attempt
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport cannot run with the credentials at hand
    #[error("credentials unusable for this transport: {0}")]
    Unusable(&'static str),

    /// The request could not be signed
    #[error("request signing failed: {0}")]
    Signing(String),

    /// No HTTP response was received
    #[error("connection error: {0}")]
    Connection(String),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered with a body that is not JSON
    #[error("response is not valid JSON: {0}")]
    Decode(String),
}

/// One way of delivering a JSON body to the endpoint
#[async_trait]
pub trait Transport: Send + Sync {
    /// Post `body` to `target` and return the decoded JSON response
    async fn send(
        &self,
        target: &Target<'_>,
        body: &[u8],
        credentials: Option<&Credentials>,
    ) -> Result<Value, TransportError>;

    /// Short name used in logs and error summaries
    fn name(&self) -> &'static str;
}

/// Turn an HTTP response into JSON, treating non-2xx statuses as failures
async fn read_json(name: &'static str, response: reqwest::Response) -> Result<Value, TransportError> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        tracing::warn!(transport = name, status = %status, "image endpoint returned an error status");

        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| TransportError::Connection(e.to_string()))?;

    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(transport = name, error = %e, "image endpoint returned invalid JSON");
        TransportError::Decode(e.to_string())
    })
}
