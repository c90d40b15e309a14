/// Credential resolution errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No identity pool (or no region for it) is configured
    #[error("identity pool not configured: {0}")]
    NotConfigured(String),

    /// The identity service rejected or failed the exchange
    #[error("credential exchange failed: {0}")]
    Exchange(String),

    /// The identity service answered without the expected fields
    #[error("identity service returned no {0}")]
    MissingCredentials(&'static str),
}
