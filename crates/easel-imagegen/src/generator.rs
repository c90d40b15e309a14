use std::sync::Arc;

use easel_config::{AuthorizationType, IMAGE_GENERATOR_API};
use easel_core::RequestContext;
use reqwest::Client;

use crate::error::{ImageGenError, Result};
use crate::response::ProviderResponse;
use crate::strategy::{self, Attempt};
use crate::transport::{DirectTransport, SignedTransport, Target, Transport, TransportError};
use crate::types::{GeneratedImage, GenerationOptions, RequestPayload};

/// Generates images through the configured API endpoint
pub struct ImageGenerator {
    endpoint_name: String,
    signed: Arc<dyn Transport>,
    direct: Arc<dyn Transport>,
}

impl Default for ImageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageGenerator {
    /// Generator using HTTP transports over a shared client
    pub fn new() -> Self {
        let client = Client::new();
        Self::with_transports(
            Arc::new(SignedTransport::new(client.clone())),
            Arc::new(DirectTransport::new(client)),
        )
    }

    /// Generator using the given signed and unsigned transports
    pub fn with_transports(signed: Arc<dyn Transport>, direct: Arc<dyn Transport>) -> Self {
        Self {
            endpoint_name: IMAGE_GENERATOR_API.to_string(),
            signed,
            direct,
        }
    }

    /// Use a different entry of the endpoint table
    #[must_use]
    pub fn with_endpoint_name(mut self, name: impl Into<String>) -> Self {
        self.endpoint_name = name.into();
        self
    }

    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }

    /// Generate one image for `prompt`
    ///
    /// The signed transport is tried first unless the endpoint is configured
    /// without authorization; the unsigned transport is always the last resort.
    ///
    /// # Errors
    ///
    /// - [`ImageGenError::InvalidRequest`] for a blank prompt or malformed size
    /// - [`ImageGenError::Config`] when the endpoint or its path is missing
    /// - [`ImageGenError::Api`] when every transport failed
    /// - [`ImageGenError::ResponseFormat`] when the response carries no image
    pub async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
        context: &RequestContext,
    ) -> Result<GeneratedImage> {
        let payload = RequestPayload::build(prompt, options)?;

        let endpoint = context.endpoint(&self.endpoint_name).ok_or_else(|| {
            ImageGenError::Config(format!("API endpoint '{}' is not configured", self.endpoint_name))
        })?;
        let path = endpoint
            .paths
            .generate_image
            .as_deref()
            .filter(|path| !path.is_empty())
            .ok_or_else(|| {
                ImageGenError::Config(format!(
                    "generate image path is not configured for '{}'",
                    self.endpoint_name
                ))
            })?;

        let url = format!("{}{path}", endpoint.endpoint);
        let target = Target {
            url: &url,
            region: context.signing_region(endpoint),
            headers: &endpoint.headers,
        };
        let body = serde_json::to_vec(&payload)
            .map_err(|e| ImageGenError::InvalidRequest(e.to_string()))?;

        let transports = match endpoint.authorization_type {
            AuthorizationType::AwsIam => vec![Arc::clone(&self.signed), Arc::clone(&self.direct)],
            AuthorizationType::None => vec![Arc::clone(&self.direct)],
        };

        tracing::info!(
            endpoint = %self.endpoint_name,
            style = %payload.style,
            width = payload.width,
            height = payload.height,
            steps = payload.steps,
            "requesting image generation"
        );

        let delivery = strategy::deliver(&transports, &target, &body, context.credentials.as_ref())
            .await
            .map_err(exhausted)?;

        let response = ProviderResponse::decode(&delivery.response)?;

        tracing::info!(transport = delivery.transport, "image generation complete");

        Ok(response.into_generated(prompt, options))
    }
}

/// Summarize failed attempts, reporting the last one
fn exhausted(attempts: Vec<Attempt>) -> ImageGenError {
    let summary: Vec<String> = attempts
        .iter()
        .map(|attempt| format!("{}: {}", attempt.transport, attempt.error))
        .collect();

    tracing::error!(attempts = ?summary, "all transports failed");

    match attempts.into_iter().last() {
        Some(Attempt {
            error: TransportError::Status { status, body },
            ..
        }) => ImageGenError::Api {
            status,
            body,
            attempts: summary,
        },
        Some(Attempt {
            error: TransportError::Decode(message),
            ..
        }) => ImageGenError::ResponseFormat(message),
        Some(Attempt { error, .. }) => ImageGenError::Api {
            status: 0,
            body: error.to_string(),
            attempts: summary,
        },
        None => ImageGenError::Config("no transport available for endpoint".to_string()),
    }
}
