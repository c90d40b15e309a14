use serde::{Deserialize, Serialize};

/// Identity pool configuration used to obtain temporary credentials
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Identity pool id (e.g. "us-east-1:0000-...")
    pub identity_pool_id: String,
    /// Region of the identity pool, defaults to the top-level region
    #[serde(default)]
    pub region: Option<String>,
    /// Require a signed-in identity before any API access
    #[serde(default)]
    pub mandatory_sign_in: bool,
}
