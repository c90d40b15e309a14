#![allow(clippy::must_use_candidate)]

pub mod api;
pub mod auth;
mod loader;
pub mod media;
mod overrides;
pub mod region;
pub mod settings;
mod store;
pub mod telemetry;

use serde::{Deserialize, Serialize};

pub use api::*;
pub use auth::*;
pub use media::*;
pub use overrides::ConfigOverride;
pub use region::format_region_name;
pub use settings::*;
pub use store::{CONFIG_KEY, CREDENTIALS_KEY, SettingsStore, StoreError, StoredConfig};
pub use telemetry::TelemetryConfig;

/// Top-level Easel configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default AWS region for identity and API calls
    #[serde(default)]
    pub region: String,
    /// Identity pool configuration; absent means anonymous access only
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    /// API Gateway endpoint table
    #[serde(default)]
    pub api: ApiConfig,
    /// Local media library configuration
    #[serde(default)]
    pub media: MediaConfig,
    /// Persisted settings location
    #[serde(default)]
    pub settings: SettingsConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}

impl Config {
    /// Region used for identity-pool calls
    ///
    /// Falls back to the top-level region when the auth section has none
    pub fn identity_region(&self) -> Option<&str> {
        self.auth
            .as_ref()
            .and_then(|auth| auth.region.as_deref())
            .or(Some(self.region.as_str()))
            .filter(|region| !region.is_empty())
    }

    /// Whether an identity pool has been configured
    pub fn has_identity_pool(&self) -> bool {
        self.auth
            .as_ref()
            .is_some_and(|auth| !auth.identity_pool_id.trim().is_empty())
    }
}
