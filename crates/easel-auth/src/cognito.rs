use async_trait::async_trait;
use aws_sdk_cognitoidentity::Client as CognitoClient;
use aws_sdk_cognitoidentity::error::DisplayErrorContext;
use easel_core::Credentials;
use jiff::Timestamp;
use secrecy::SecretString;

use crate::{AuthError, IdentityPool};

/// Identity pool backed by Amazon Cognito guest identities
///
/// Performs `GetId` followed by `GetCredentialsForIdentity`; both calls are
/// unsigned so no ambient AWS credentials are needed
#[derive(Debug, Default, Clone, Copy)]
pub struct CognitoIdentityPool;

impl CognitoIdentityPool {
    async fn client(region: &str) -> CognitoClient {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_owned()))
            .no_credentials()
            .load()
            .await;

        CognitoClient::new(&sdk_config)
    }
}

#[async_trait]
impl IdentityPool for CognitoIdentityPool {
    async fn credentials(&self, identity_pool_id: &str, region: &str) -> Result<Credentials, AuthError> {
        let client = Self::client(region).await;

        let id_output = client
            .get_id()
            .identity_pool_id(identity_pool_id)
            .send()
            .await
            .map_err(|e| AuthError::Exchange(format!("GetId: {}", DisplayErrorContext(&e))))?;

        let identity_id = id_output
            .identity_id()
            .ok_or(AuthError::MissingCredentials("identity id"))?
            .to_owned();

        let output = client
            .get_credentials_for_identity()
            .identity_id(&identity_id)
            .send()
            .await
            .map_err(|e| AuthError::Exchange(format!("GetCredentialsForIdentity: {}", DisplayErrorContext(&e))))?;

        let issued = output
            .credentials()
            .ok_or(AuthError::MissingCredentials("credentials"))?;

        Ok(Credentials {
            access_key_id: issued.access_key_id().map(str::to_owned),
            secret_access_key: issued.secret_key().map(SecretString::from),
            session_token: issued.session_token().map(SecretString::from),
            identity_id: Some(identity_id),
            authenticated: false,
            expiration: issued
                .expiration()
                .and_then(|expiration| Timestamp::from_second(expiration.secs()).ok()),
        })
    }
}
