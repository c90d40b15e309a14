use serde::{Deserialize, Serialize};

use crate::{ApiConfig, AuthConfig, Config, StoredConfig};

/// Partial configuration applied on top of the live config
///
/// Each present section replaces the corresponding section wholesale
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverride {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub api: Option<ApiConfig>,
}

impl ConfigOverride {
    pub fn is_empty(&self) -> bool {
        self.region.is_none() && self.auth.is_none() && self.api.is_none()
    }
}

impl From<StoredConfig> for ConfigOverride {
    fn from(stored: StoredConfig) -> Self {
        Self {
            region: Some(stored.region),
            auth: stored.auth,
            api: Some(stored.api),
        }
    }
}

impl Config {
    /// Merge a partial override into this configuration
    pub fn merge(&mut self, overrides: ConfigOverride) {
        if let Some(region) = overrides.region {
            self.region = region;
        }

        if let Some(auth) = overrides.auth {
            self.auth = Some(auth);
        }

        if let Some(api) = overrides.api {
            self.api = api;
        }
    }
}
