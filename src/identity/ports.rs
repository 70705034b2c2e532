//! Identity provider port consumed at session start.

use super::domain::{Credential, User};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityProviderError>;

/// Session identity contract.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the currently signed-in user, if any.
    async fn current_user(&self) -> IdentityResult<Option<User>>;

    /// Exchanges a credential for a signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::InvalidCredential`] when the
    /// credential is not recognized.
    async fn login(&self, credential: &Credential) -> IdentityResult<User>;

    /// Ends the current session.
    async fn logout(&self) -> IdentityResult<()>;
}

/// Errors returned by identity provider adapters.
#[derive(Debug, Clone, Error)]
pub enum IdentityProviderError {
    /// The presented credential was not recognized.
    #[error("credential was not accepted")]
    InvalidCredential,

    /// Provider-layer failure.
    #[error("identity provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityProviderError {
    /// Wraps a provider-layer error.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
