use easel_config::{ApiConfig, Config, EndpointConfig};

use crate::Credentials;

/// Everything an adapter call needs, passed explicitly
///
/// Callers refresh credentials before building the context; the adapter
/// never reaches for ambient state
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Default region, used when an endpoint has no signing region
    pub region: String,
    /// Endpoint table
    pub api: ApiConfig,
    /// Current credentials; `None` is the anonymous mode
    pub credentials: Option<Credentials>,
}

impl RequestContext {
    /// Snapshot the relevant parts of `config` together with `credentials`
    pub fn new(config: &Config, credentials: Option<Credentials>) -> Self {
        Self {
            region: config.region.clone(),
            api: config.api.clone(),
            credentials,
        }
    }

    /// Context without credentials
    pub fn anonymous(config: &Config) -> Self {
        Self::new(config, None)
    }

    /// Look up an endpoint by name
    pub fn endpoint(&self, name: &str) -> Option<&EndpointConfig> {
        self.api.endpoint(name)
    }

    /// Signing region for an endpoint
    pub fn signing_region<'a>(&'a self, endpoint: &'a EndpointConfig) -> &'a str {
        endpoint.region.as_deref().unwrap_or(&self.region)
    }
}
