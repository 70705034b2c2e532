//! In-memory identity provider for tests and local sessions.

use super::{
    domain::{Credential, User},
    ports::{IdentityProvider, IdentityProviderError, IdentityResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory identity provider.
///
/// Credentials are registered up front; `login` swaps the current user,
/// `logout` clears it. Suitable for unit tests and local deterministic
/// sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    state: Arc<RwLock<IdentityState>>,
}

#[derive(Debug, Default)]
struct IdentityState {
    accounts: HashMap<String, User>,
    current: Option<User>,
}

impl InMemoryIdentityProvider {
    /// Creates a provider with no registered accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account reachable through `credential`.
    ///
    /// An existing registration for the same credential is replaced.
    ///
    /// # Errors
    ///
    /// Returns provider errors when lock acquisition fails.
    pub fn register(&self, credential: &Credential, user: User) -> IdentityResult<()> {
        let mut state = self.state.write().map_err(|err| {
            IdentityProviderError::provider(std::io::Error::other(err.to_string()))
        })?;
        state.accounts.insert(credential.as_str().to_owned(), user);
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn current_user(&self) -> IdentityResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            IdentityProviderError::provider(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.current.clone())
    }

    async fn login(&self, credential: &Credential) -> IdentityResult<User> {
        let mut state = self.state.write().map_err(|err| {
            IdentityProviderError::provider(std::io::Error::other(err.to_string()))
        })?;
        let user = state
            .accounts
            .get(credential.as_str())
            .cloned()
            .ok_or(IdentityProviderError::InvalidCredential)?;
        state.current = Some(user.clone());
        Ok(user)
    }

    async fn logout(&self) -> IdentityResult<()> {
        let mut state = self.state.write().map_err(|err| {
            IdentityProviderError::provider(std::io::Error::other(err.to_string()))
        })?;
        state.current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::domain::UserId;

    fn demo_user() -> User {
        User::new(UserId::new(), "Demo User", "demo@example.com").expect("valid user")
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn login_swaps_the_current_user() {
        let provider = InMemoryIdentityProvider::new();
        let credential = Credential::new("token-1").expect("valid credential");
        let user = demo_user();
        provider
            .register(&credential, user.clone())
            .expect("registration should succeed");

        assert!(
            provider
                .current_user()
                .await
                .expect("lookup should succeed")
                .is_none()
        );

        let signed_in = provider.login(&credential).await.expect("login");
        assert_eq!(signed_in.id(), user.id());
        assert_eq!(
            provider
                .current_user()
                .await
                .expect("lookup should succeed")
                .map(|current| current.id()),
            Some(user.id())
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unknown_credential_is_rejected() {
        let provider = InMemoryIdentityProvider::new();
        let credential = Credential::new("missing").expect("valid credential");

        let result = provider.login(&credential).await;

        assert!(matches!(
            result,
            Err(IdentityProviderError::InvalidCredential)
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn logout_clears_the_current_user() {
        let provider = InMemoryIdentityProvider::new();
        let credential = Credential::new("token-2").expect("valid credential");
        provider
            .register(&credential, demo_user())
            .expect("registration should succeed");
        provider.login(&credential).await.expect("login");

        provider.logout().await.expect("logout");

        assert!(
            provider
                .current_user()
                .await
                .expect("lookup should succeed")
                .is_none()
        );
    }
}
