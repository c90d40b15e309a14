use std::time::SystemTime;

use async_trait::async_trait;
use aws_sigv4::http_request::{SignableBody, SignableRequest, SigningParams, SigningSettings, sign};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use easel_core::Credentials;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use secrecy::ExposeSecret;
use serde_json::Value;

use super::{Target, Transport, TransportError, read_json};

/// Signing name of API Gateway
const SERVICE_NAME: &str = "execute-api";

/// Provider name recorded on credentials handed to the signer
const PROVIDER_NAME: &str = "easel-identity-pool";

/// `SigV4`-signed JSON POST
pub struct SignedTransport {
    client: Client,
}

impl SignedTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Compute the headers that authorize `body` for `target` at `time`
///
/// Fails without a network call when the credentials cannot sign
fn signing_headers(
    target: &Target<'_>,
    body: &[u8],
    credentials: Option<&Credentials>,
    time: SystemTime,
) -> Result<Vec<(String, String)>, TransportError> {
    let credentials = credentials.ok_or(TransportError::Unusable("no credentials available"))?;
    let (access_key_id, secret_access_key) = credentials
        .signing_keys()
        .ok_or(TransportError::Unusable("no signing key pair"))?;
    if credentials.is_expired() {
        return Err(TransportError::Unusable("credentials expired"));
    }

    let identity: Identity = aws_credential_types::Credentials::new(
        access_key_id,
        secret_access_key.expose_secret(),
        credentials.session_token().map(str::to_string),
        credentials.expiration.map(SystemTime::from),
        PROVIDER_NAME,
    )
    .into();

    let params: SigningParams<'_> = v4::SigningParams::builder()
        .identity(&identity)
        .region(target.region)
        .name(SERVICE_NAME)
        .time(time)
        .settings(SigningSettings::default())
        .build()
        .map_err(|e| TransportError::Signing(e.to_string()))?
        .into();

    let mut headers = vec![("content-type", "application/json")];
    headers.extend(
        target
            .headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    );

    let signable = SignableRequest::new("POST", target.url, headers.into_iter(), SignableBody::Bytes(body))
        .map_err(|e| TransportError::Signing(e.to_string()))?;

    let (instructions, _signature) = sign(signable, &params)
        .map_err(|e| TransportError::Signing(e.to_string()))?
        .into_parts();

    Ok(instructions
        .headers()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect())
}

#[async_trait]
impl Transport for SignedTransport {
    async fn send(
        &self,
        target: &Target<'_>,
        body: &[u8],
        credentials: Option<&Credentials>,
    ) -> Result<Value, TransportError> {
        let signed_headers = signing_headers(target, body, credentials, SystemTime::now())?;

        let mut request = self
            .client
            .post(target.url)
            .header(CONTENT_TYPE, "application/json");

        for (name, value) in target.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        for (name, value) in &signed_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        tracing::debug!(transport = self.name(), url = %target.url, region = %target.region, "sending signed request");

        let response = request.body(body.to_vec()).send().await.map_err(|e| {
            tracing::error!(transport = self.name(), error = %e, "signed request failed");
            TransportError::Connection(e.to_string())
        })?;

        read_json(self.name(), response).await
    }

    fn name(&self) -> &'static str {
        "signed"
    }
}
