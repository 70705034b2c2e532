//! Per-session wiring of the lifecycle service and its scheduler.
//!
//! A session binds the signed-in user to a lifecycle service and a running
//! scheduler. Each session owns its scheduler instance; no timer state is
//! shared across sessions or processes.

use crate::content::{
    ports::{ContentFeed, ContentGenerator, ContentStore},
    services::{
        lifecycle::ContentLifecycleService,
        scheduler::{ContentScheduler, SchedulerConfig},
    },
};
use crate::identity::{IdentityProvider, IdentityProviderError, User};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while opening a session.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// No user is currently signed in.
    #[error("no user is signed in")]
    NotSignedIn,
    /// Identity lookup failed.
    #[error(transparent)]
    Identity(#[from] IdentityProviderError),
}

/// Shared resources a session is built from.
#[derive(Debug, Clone)]
pub struct SessionResources<S, G, F, C>
where
    S: ContentStore + 'static,
    G: ContentGenerator,
    F: ContentFeed + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Content item store.
    pub store: Arc<S>,
    /// Generation provider.
    pub generator: Arc<G>,
    /// Feed notified of scheduler updates.
    pub feed: Arc<F>,
    /// Clock shared by the lifecycle service and the scheduler.
    pub clock: Arc<C>,
    /// Sweep cadence for the session's scheduler.
    pub scheduler: SchedulerConfig,
}

/// A signed-in user's content session.
pub struct ContentSession<S, G, F, C>
where
    S: ContentStore + 'static,
    G: ContentGenerator,
    F: ContentFeed + 'static,
    C: Clock + Send + Sync + 'static,
{
    user: User,
    content: ContentLifecycleService<S, G, C>,
    scheduler: ContentScheduler<S, F, C>,
}

impl<S, G, F, C> ContentSession<S, G, F, C>
where
    S: ContentStore + 'static,
    G: ContentGenerator,
    F: ContentFeed + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Opens a session for the currently signed-in user and starts its
    /// scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotSignedIn`] when no user is signed in and
    /// identity provider errors otherwise.
    pub async fn open(
        identity: &impl IdentityProvider,
        resources: SessionResources<S, G, F, C>,
    ) -> Result<Self, SessionError> {
        let user = identity
            .current_user()
            .await?
            .ok_or(SessionError::NotSignedIn)?;

        let content = ContentLifecycleService::new(
            Arc::clone(&resources.store),
            Arc::clone(&resources.generator),
            Arc::clone(&resources.clock),
            user.id(),
        );
        let mut scheduler = ContentScheduler::new(
            resources.store,
            resources.feed,
            resources.clock,
            user.id(),
            resources.scheduler,
        );
        scheduler.start();

        Ok(Self {
            user,
            content,
            scheduler,
        })
    }

    /// Returns the signed-in user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Returns the session's lifecycle service.
    #[must_use]
    pub const fn content(&self) -> &ContentLifecycleService<S, G, C> {
        &self.content
    }

    /// Returns the session's scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &ContentScheduler<S, F, C> {
        &self.scheduler
    }

    /// Closes the session, stopping its scheduler.
    pub fn close(mut self) {
        self.scheduler.stop();
    }
}
