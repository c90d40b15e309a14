//! Temporary credentials for signed API calls
//!
//! Credentials come from an identity pool. Failing to obtain them is not
//! fatal: callers continue in anonymous mode.

mod cognito;
mod error;
mod provider;

pub use cognito::CognitoIdentityPool;
pub use error::AuthError;
pub use provider::{CredentialProvider, IdentityPool};
