use jiff::Timestamp;
use secrecy::{ExposeSecret, SecretString};

/// Temporary credentials issued by the identity pool
///
/// Every field may be missing; an anonymous identity carries none of them
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Access key id
    pub access_key_id: Option<String>,
    /// Secret access key
    pub secret_access_key: Option<SecretString>,
    /// Session token bound to the temporary key pair
    pub session_token: Option<SecretString>,
    /// Identity the credentials were issued for
    pub identity_id: Option<String>,
    /// Whether the identity is a signed-in (non-guest) identity
    pub authenticated: bool,
    /// When the credentials stop being valid
    pub expiration: Option<Timestamp>,
}

impl Credentials {
    /// Whether the credentials had expired at `now`
    ///
    /// Credentials without an expiration never expire
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expiration.is_some_and(|expiration| expiration <= now)
    }

    /// Whether the credentials have expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Timestamp::now())
    }

    /// Key pair usable for request signing, if both halves are present and non-empty
    pub fn signing_keys(&self) -> Option<(&str, &SecretString)> {
        let access_key_id = self.access_key_id.as_deref().filter(|key| !key.is_empty())?;
        let secret_access_key = self
            .secret_access_key
            .as_ref()
            .filter(|secret| !secret.expose_secret().is_empty())?;
        Some((access_key_id, secret_access_key))
    }

    /// Session token, if one was issued
    pub fn session_token(&self) -> Option<&str> {
        self.session_token
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|token| !token.is_empty())
    }
}
