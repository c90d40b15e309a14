use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the endpoint used for image generation
pub const IMAGE_GENERATOR_API: &str = "ImageGeneratorAPI";

/// API Gateway endpoint table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Endpoint configurations keyed by name
    #[serde(default)]
    pub endpoints: IndexMap<String, EndpointConfig>,
}

impl ApiConfig {
    /// Look up an endpoint by name
    pub fn endpoint(&self, name: &str) -> Option<&EndpointConfig> {
        self.endpoints.get(name)
    }
}

/// Configuration for a single API Gateway endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// Base URL of the deployment (e.g. `https://abc.execute-api.us-east-1.amazonaws.com`)
    pub endpoint: String,
    /// How requests to this endpoint are authorized
    #[serde(default)]
    pub authorization_type: AuthorizationType,
    /// Signing region, defaults to the top-level region
    #[serde(default)]
    pub region: Option<String>,
    /// Resource paths exposed by this endpoint
    #[serde(default)]
    pub paths: EndpointPaths,
    /// Extra headers sent with every request
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
}

/// Resource paths, appended verbatim to the endpoint base URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointPaths {
    /// Path of the generate-image resource (e.g. "/prod/generateImage")
    #[serde(default)]
    pub generate_image: Option<String>,
}

/// Supported endpoint authorization schemes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationType {
    /// Requests are signed with temporary credentials (`SigV4`)
    #[default]
    AwsIam,
    /// Requests are sent unsigned
    None,
}
