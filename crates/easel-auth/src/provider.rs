use std::sync::Arc;

use async_trait::async_trait;
use easel_config::Config;
use easel_core::Credentials;

use crate::{AuthError, CognitoIdentityPool};

/// Source of temporary credentials for an identity pool
#[async_trait]
pub trait IdentityPool: Send + Sync {
    /// Exchange the identity pool id for temporary credentials
    async fn credentials(&self, identity_pool_id: &str, region: &str) -> Result<Credentials, AuthError>;
}

/// Holds the current credentials and knows how to obtain new ones
///
/// There is no retry or backoff: each resolution is a single exchange
#[derive(Clone)]
pub struct CredentialProvider {
    pool: Arc<dyn IdentityPool>,
    current: Option<Credentials>,
}

impl std::fmt::Debug for CredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialProvider")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl CredentialProvider {
    pub fn new(pool: Arc<dyn IdentityPool>) -> Self {
        Self { pool, current: None }
    }

    /// Provider backed by Cognito guest identities
    pub fn cognito() -> Self {
        Self::new(Arc::new(CognitoIdentityPool))
    }

    /// Credentials from the last successful resolution
    pub fn current(&self) -> Option<&Credentials> {
        self.current.as_ref()
    }

    /// Resolve credentials, falling back to anonymous mode on failure
    ///
    /// Used at startup and after a configuration change. The failure is
    /// logged and the previous credentials are dropped.
    pub async fn resolve(&mut self, config: &Config) -> Option<&Credentials> {
        match self.fetch(config).await {
            Ok(credentials) => Some(&*self.current.insert(credentials)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to obtain credentials, continuing without signed access");
                self.current = None;
                None
            }
        }
    }

    /// Refresh credentials on demand
    ///
    /// # Errors
    ///
    /// Returns the exchange error; cached credentials are cleared on failure
    pub async fn refresh(&mut self, config: &Config) -> Result<&Credentials, AuthError> {
        match self.fetch(config).await {
            Ok(credentials) => Ok(&*self.current.insert(credentials)),
            Err(e) => {
                tracing::error!(error = %e, "failed to refresh credentials");
                self.current = None;
                Err(e)
            }
        }
    }

    /// Forget the current credentials
    pub fn clear(&mut self) {
        self.current = None;
    }

    async fn fetch(&self, config: &Config) -> Result<Credentials, AuthError> {
        let identity_pool_id = config
            .auth
            .as_ref()
            .map(|auth| auth.identity_pool_id.trim())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AuthError::NotConfigured("identity_pool_id is missing".to_string()))?;

        let region = config
            .identity_region()
            .ok_or_else(|| AuthError::NotConfigured("region is missing".to_string()))?;

        let credentials = self.pool.credentials(identity_pool_id, region).await?;

        tracing::debug!(
            authenticated = credentials.authenticated,
            has_identity_id = credentials.identity_id.is_some(),
            has_access_key = credentials.access_key_id.is_some(),
            has_session_token = credentials.session_token().is_some(),
            expired = credentials.is_expired(),
            "credentials obtained"
        );

        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use easel_config::AuthConfig;
    use secrecy::SecretString;

    use super::*;

    /// Identity pool that records requests and replays a canned outcome
    struct StubPool {
        fail: bool,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl StubPool {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IdentityPool for StubPool {
        async fn credentials(&self, identity_pool_id: &str, region: &str) -> Result<Credentials, AuthError> {
            self.calls
                .lock()
                .unwrap()
                .push((identity_pool_id.to_owned(), region.to_owned()));

            if self.fail {
                return Err(AuthError::Exchange("pool unavailable".to_string()));
            }

            Ok(Credentials {
                access_key_id: Some("AKIDEXAMPLE".to_string()),
                secret_access_key: Some(SecretString::from("secret")),
                session_token: Some(SecretString::from("token")),
                identity_id: Some(format!("{region}:guest")),
                authenticated: false,
                expiration: None,
            })
        }
    }

    fn config_with_pool() -> Config {
        Config {
            region: "us-east-1".to_string(),
            auth: Some(AuthConfig {
                identity_pool_id: "us-east-1:pool".to_string(),
                region: Some("ap-northeast-1".to_string()),
                mandatory_sign_in: false,
            }),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn resolve_uses_identity_region() {
        let pool = StubPool::new(false);
        let mut provider = CredentialProvider::new(pool.clone());

        let credentials = provider.resolve(&config_with_pool()).await.unwrap();

        assert_eq!(credentials.identity_id.as_deref(), Some("ap-northeast-1:guest"));
        assert_eq!(
            pool.calls(),
            vec![("us-east-1:pool".to_owned(), "ap-northeast-1".to_owned())]
        );
    }

    #[tokio::test]
    async fn resolve_failure_is_anonymous() {
        let mut provider = CredentialProvider::new(StubPool::new(true));

        assert!(provider.resolve(&config_with_pool()).await.is_none());
        assert!(provider.current().is_none());
    }

    #[tokio::test]
    async fn resolve_without_pool_skips_exchange() {
        let pool = StubPool::new(false);
        let mut provider = CredentialProvider::new(pool.clone());

        assert!(provider.resolve(&Config::default()).await.is_none());
        assert!(pool.calls().is_empty());
    }

    #[tokio::test]
    async fn refresh_surfaces_error_and_clears_cache() {
        let mut provider = CredentialProvider::new(StubPool::new(false));
        provider.resolve(&config_with_pool()).await.unwrap();
        assert!(provider.current().is_some());

        provider.pool = StubPool::new(true);
        let result = provider.refresh(&config_with_pool()).await;

        assert!(matches!(result, Err(AuthError::Exchange(_))));
        assert!(provider.current().is_none());
    }

    #[tokio::test]
    async fn refresh_without_pool_reports_not_configured() {
        let mut provider = CredentialProvider::new(StubPool::new(false));

        let result = provider.refresh(&Config::default()).await;

        assert!(matches!(result, Err(AuthError::NotConfigured(_))));
    }
}
