//! Programmatic configuration builder for integration tests

use std::path::Path;

use easel_config::{
    ApiConfig, AuthConfig, AuthorizationType, Config, EndpointConfig, EndpointPaths, IMAGE_GENERATOR_API,
    MediaConfig, SettingsConfig,
};
use easel_core::Credentials;
use indexmap::IndexMap;
use secrecy::SecretString;

use super::gateway::GENERATE_PATH;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Minimal configuration with all state kept under `root`
    pub fn new(root: &Path) -> Self {
        Self {
            config: Config {
                region: "us-east-1".to_owned(),
                media: MediaConfig {
                    library_dir: root.join("library"),
                    cache_dir: Some(root.join("cache")),
                    share_dir: Some(root.join("outbox")),
                    album_name: "AI Generated Images".to_owned(),
                },
                settings: SettingsConfig {
                    dir: root.join("settings"),
                },
                ..Config::default()
            },
        }
    }

    /// Point the image generator endpoint at `base_url`
    pub fn with_gateway(mut self, base_url: &str, authorization_type: AuthorizationType) -> Self {
        self.config.api = ApiConfig::default();
        self.config.api.endpoints.insert(
            IMAGE_GENERATOR_API.to_owned(),
            EndpointConfig {
                endpoint: base_url.to_owned(),
                authorization_type,
                region: None,
                paths: EndpointPaths {
                    generate_image: Some(GENERATE_PATH.to_owned()),
                },
                headers: IndexMap::new(),
            },
        );
        self
    }

    /// Add an extra header to the image generator endpoint
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let Some(endpoint) = self.config.api.endpoints.get_mut(IMAGE_GENERATOR_API) {
            endpoint.headers.insert(name.to_owned(), value.to_owned());
        }
        self
    }

    /// Configure an identity pool
    pub fn with_identity_pool(mut self, identity_pool_id: &str) -> Self {
        self.config.auth = Some(AuthConfig {
            identity_pool_id: identity_pool_id.to_owned(),
            region: None,
            mandatory_sign_in: false,
        });
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}

/// Guest credentials as the identity pool would issue them
pub fn guest_credentials() -> Credentials {
    Credentials {
        access_key_id: Some("ASIAEXAMPLE".to_owned()),
        secret_access_key: Some(SecretString::from("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")),
        session_token: Some(SecretString::from("guest-session-token")),
        identity_id: Some("us-east-1:guest".to_owned()),
        authenticated: false,
        expiration: None,
    }
}
