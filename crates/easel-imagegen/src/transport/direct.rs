use async_trait::async_trait;
use easel_core::Credentials;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use super::{Target, Transport, TransportError, read_json};

/// Header carrying the session token on unsigned requests
const SECURITY_TOKEN_HEADER: &str = "X-Amz-Security-Token";

/// Unsigned JSON POST
///
/// Forwards the session token when one is available so gateways that accept
/// token-only authorization still see it
pub struct DirectTransport {
    client: Client,
}

impl DirectTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for DirectTransport {
    async fn send(
        &self,
        target: &Target<'_>,
        body: &[u8],
        credentials: Option<&Credentials>,
    ) -> Result<Value, TransportError> {
        let mut request = self
            .client
            .post(target.url)
            .header(CONTENT_TYPE, "application/json");

        for (name, value) in target.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if let Some(token) = credentials.and_then(Credentials::session_token) {
            request = request.header(SECURITY_TOKEN_HEADER, token);
        }

        tracing::debug!(transport = self.name(), url = %target.url, "sending unsigned request");

        let response = request.body(body.to_vec()).send().await.map_err(|e| {
            tracing::error!(transport = self.name(), error = %e, "unsigned request failed");
            TransportError::Connection(e.to_string())
        })?;

        read_json(self.name(), response).await
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}
