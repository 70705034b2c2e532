//! Recurring sweep that posts scheduled items when their time arrives.
//!
//! The scheduler is an explicit per-session object owning its timer task;
//! it holds no item state between ticks and re-reads the store on every
//! sweep, so controller mutations and scheduler promotions never act on
//! diverged snapshots.

use crate::content::{
    domain::{ContentDomainError, ContentId, ContentItem},
    ports::{ContentFeed, ContentStore, ContentStoreError},
};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Sweep cadence matching the original ten-second check.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Timer configuration for the recurring sweep.
///
/// Posting precision is deliberately coarse; the sweep is a best-effort
/// cron-like check, not a precise timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Time between sweeps.
    pub poll_interval: Duration,
}

impl SchedulerConfig {
    /// Creates a configuration with the given sweep cadence.
    #[must_use]
    pub const fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

/// Errors surfaced by a single sweep.
///
/// The background loop never propagates these; a failed sweep is logged,
/// abandoned, and retried at the next interval.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Domain validation failed while posting an item.
    #[error(transparent)]
    Domain(#[from] ContentDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] ContentStoreError),
}

/// Selects the identifiers of items due for posting.
///
/// Pure with respect to its inputs, which keeps sweep selection testable
/// against a fixed snapshot and a fixed instant.
#[must_use]
pub fn due_item_ids(items: &[ContentItem], now: DateTime<Utc>) -> Vec<ContentId> {
    items
        .iter()
        .filter(|item| item.is_due(now))
        .map(ContentItem::id)
        .collect()
}

/// Recurring lifecycle sweep for one user's collection.
pub struct ContentScheduler<S, F, C>
where
    S: ContentStore + 'static,
    F: ContentFeed + 'static,
    C: Clock + Send + Sync + 'static,
{
    store: Arc<S>,
    feed: Arc<F>,
    clock: Arc<C>,
    owner: UserId,
    config: SchedulerConfig,
    handle: Option<JoinHandle<()>>,
}

impl<S, F, C> ContentScheduler<S, F, C>
where
    S: ContentStore + 'static,
    F: ContentFeed + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a stopped scheduler for the given owner.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        feed: Arc<F>,
        clock: Arc<C>,
        owner: UserId,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            store,
            feed,
            clock,
            owner,
            config,
            handle: None,
        }
    }

    /// Begins the recurring sweep.
    ///
    /// Calling `start` while a sweep loop is already running stops the
    /// previous loop first, so at most one timer acts on the collection.
    pub fn start(&mut self) {
        self.stop();

        let store = Arc::clone(&self.store);
        let feed = Arc::clone(&self.feed);
        let clock = Arc::clone(&self.clock);
        let owner = self.owner;
        let poll_interval = self.config.poll_interval;

        self.handle = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(poll_interval).await;
                if let Err(error) = sweep_once(&*store, &*feed, &*clock, owner).await {
                    tracing::warn!(%owner, %error, "scheduler sweep abandoned, retrying next interval");
                }
            }
        }));
    }

    /// Cancels the recurring sweep.
    ///
    /// Idempotent; safe to call when not started. A sweep already in
    /// flight may complete, but no further sweep is scheduled.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Returns whether the sweep loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Runs one sweep immediately.
    ///
    /// Reads the owner's current snapshot, posts every due item, and
    /// publishes the updated collection through the feed when at least one
    /// item changed. Returns whether an update was published.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError`] when the store fails or a due item
    /// refuses the posting transition.
    pub async fn tick(&self) -> Result<bool, SchedulerError> {
        sweep_once(&*self.store, &*self.feed, &*self.clock, self.owner).await
    }
}

impl<S, F, C> Drop for ContentScheduler<S, F, C>
where
    S: ContentStore + 'static,
    F: ContentFeed + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.stop();
    }
}

async fn sweep_once<S, F, C>(
    store: &S,
    feed: &F,
    clock: &C,
    owner: UserId,
) -> Result<bool, SchedulerError>
where
    S: ContentStore,
    F: ContentFeed,
    C: Clock + Send + Sync,
{
    let items = store.list(owner).await?;
    let now = clock.utc();
    let due = due_item_ids(&items, now);
    if due.is_empty() {
        return Ok(false);
    }

    for mut item in items
        .into_iter()
        .filter(|item| due.contains(&item.id()))
    {
        item.mark_posted(clock)?;
        store.update(owner, &item).await?;
    }

    let snapshot = store.list(owner).await?;
    feed.publish(owner, &snapshot).await;
    Ok(true)
}
