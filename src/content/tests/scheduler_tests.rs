//! Unit tests for the recurring scheduler sweep.

use super::support::{FixedClock, instant, item_with_status};
use crate::content::{
    adapters::memory::{InMemoryContentStore, RecordingContentFeed},
    domain::{ContentId, ContentItem, ContentStatus},
    ports::{ContentStore, ContentStoreError, ContentStoreResult},
    services::{ContentScheduler, SchedulerConfig, SchedulerError, due_item_ids},
};
use crate::identity::UserId;
use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use eyre::ensure;
use mockable::DefaultClock;
use mockall::mock;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

mock! {
    pub Store {}

    #[async_trait]
    impl ContentStore for Store {
        async fn list(&self, owner: UserId) -> ContentStoreResult<Vec<ContentItem>>;
        async fn create(&self, owner: UserId, item: &ContentItem) -> ContentStoreResult<ContentItem>;
        async fn update(&self, owner: UserId, item: &ContentItem) -> ContentStoreResult<ContentItem>;
        async fn delete(&self, owner: UserId, id: ContentId) -> ContentStoreResult<()>;
        async fn find_by_id(
            &self,
            owner: UserId,
            id: ContentId,
        ) -> ContentStoreResult<Option<ContentItem>>;
    }
}

type TestScheduler<C> = ContentScheduler<InMemoryContentStore, RecordingContentFeed, C>;

struct SchedulerHarness<C>
where
    C: mockable::Clock + Send + Sync + 'static,
{
    owner: UserId,
    store: Arc<InMemoryContentStore>,
    feed: Arc<RecordingContentFeed>,
    scheduler: TestScheduler<C>,
}

async fn seeded_scheduler<C>(
    items: &[ContentItem],
    clock: C,
    config: SchedulerConfig,
) -> SchedulerHarness<C>
where
    C: mockable::Clock + Send + Sync + 'static,
{
    let owner = UserId::new();
    let store = Arc::new(InMemoryContentStore::new());
    for item in items {
        store
            .create(owner, item)
            .await
            .expect("seeding the store should succeed");
    }
    let feed = Arc::new(RecordingContentFeed::new());
    let scheduler = ContentScheduler::new(
        Arc::clone(&store),
        Arc::clone(&feed),
        Arc::new(clock),
        owner,
        config,
    );
    SchedulerHarness {
        owner,
        store,
        feed,
        scheduler,
    }
}

#[rstest]
fn due_selection_is_a_pure_function_of_snapshot_and_now() {
    let now = instant(12, 0);
    let due = item_with_status(ContentStatus::Scheduled, Some(instant(11, 30)));
    let boundary = item_with_status(ContentStatus::Scheduled, Some(now));
    let future = item_with_status(ContentStatus::Scheduled, Some(instant(12, 30)));
    let pending = item_with_status(ContentStatus::Pending, None);
    let snapshot = vec![due.clone(), boundary.clone(), future, pending];

    let selected = due_item_ids(&snapshot, now);

    assert_eq!(selected, vec![due.id(), boundary.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tick_posts_due_items_and_publishes_once() -> eyre::Result<()> {
    let item = item_with_status(ContentStatus::Scheduled, Some(instant(11, 0)));
    let harness = seeded_scheduler(
        &[item.clone()],
        FixedClock(instant(12, 0)),
        SchedulerConfig::default(),
    )
    .await;

    let published = harness.scheduler.tick().await?;

    ensure!(published, "a due item should produce an update");
    ensure!(harness.feed.publish_count() == 1);

    let snapshot = harness
        .feed
        .last_snapshot()
        .ok_or_else(|| eyre::eyre!("missing snapshot"))?;
    ensure!(snapshot.len() == 1);
    ensure!(snapshot.first().is_some_and(|posted| {
        posted.status() == ContentStatus::Posted && posted.schedule().is_none()
    }));

    let stored = harness
        .store
        .find_by_id(harness.owner, item.id())
        .await?
        .ok_or_else(|| eyre::eyre!("item should survive posting"))?;
    ensure!(stored.status() == ContentStatus::Posted);
    ensure!(stored.schedule().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tick_leaves_future_items_untouched() -> eyre::Result<()> {
    let item = item_with_status(ContentStatus::Scheduled, Some(instant(15, 0)));
    let harness = seeded_scheduler(
        &[item],
        FixedClock(instant(12, 0)),
        SchedulerConfig::default(),
    )
    .await;

    for _ in 0..3 {
        let published = harness.scheduler.tick().await?;
        ensure!(
            !published,
            "no update should be published before the schedule time"
        );
    }

    ensure!(harness.feed.publish_count() == 0);
    let items = harness.store.list(harness.owner).await?;
    ensure!(items.first().is_some_and(|stored| {
        stored.status() == ContentStatus::Scheduled && stored.schedule() == Some(instant(15, 0))
    }));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_tick_with_no_newly_due_items_publishes_nothing() -> eyre::Result<()> {
    let item = item_with_status(ContentStatus::Scheduled, Some(instant(11, 0)));
    let harness = seeded_scheduler(
        &[item],
        FixedClock(instant(12, 0)),
        SchedulerConfig::default(),
    )
    .await;

    let first = harness.scheduler.tick().await?;
    let second = harness.scheduler.tick().await?;

    ensure!(first, "the first tick should post the due item");
    ensure!(!second, "the second tick has nothing left to post");
    ensure!(harness.feed.publish_count() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tick_on_an_empty_collection_publishes_nothing() -> eyre::Result<()> {
    let harness =
        seeded_scheduler(&[], FixedClock(instant(12, 0)), SchedulerConfig::default()).await;

    let published = harness.scheduler.tick().await?;

    ensure!(!published);
    ensure!(harness.feed.publish_count() == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_failure_surfaces_from_tick() {
    let mut store = MockStore::new();
    store.expect_list().returning(|_| {
        Err(ContentStoreError::persistence(std::io::Error::other(
            "store offline",
        )))
    });
    let scheduler = ContentScheduler::new(
        Arc::new(store),
        Arc::new(RecordingContentFeed::new()),
        Arc::new(FixedClock(instant(12, 0))),
        UserId::new(),
        SchedulerConfig::default(),
    );

    let result = scheduler.tick().await;

    assert!(matches!(result, Err(SchedulerError::Store(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn started_scheduler_posts_due_items_autonomously() {
    let item = item_with_status(ContentStatus::Scheduled, Some(instant(9, 0)));
    let mut harness = seeded_scheduler(
        &[item],
        DefaultClock,
        SchedulerConfig::new(Duration::from_millis(10)),
    )
    .await;

    harness.scheduler.start();
    assert!(harness.scheduler.is_running());

    let mut published = false;
    for _ in 0..100 {
        if harness.feed.publish_count() > 0 {
            published = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    harness.scheduler.stop();

    assert!(
        published,
        "the sweep loop should publish without an external trigger"
    );
    let snapshot = harness.feed.last_snapshot().expect("snapshot should exist");
    assert!(
        snapshot
            .iter()
            .all(|posted| posted.status() == ContentStatus::Posted)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stopped_scheduler_runs_no_further_sweeps() {
    let item = item_with_status(ContentStatus::Scheduled, Some(instant(9, 0)));
    let mut harness = seeded_scheduler(
        &[item],
        DefaultClock,
        SchedulerConfig::new(Duration::from_millis(20)),
    )
    .await;

    harness.scheduler.start();
    harness.scheduler.stop();
    assert!(!harness.scheduler.is_running());

    tokio::time::sleep(Duration::from_millis(120)).await;

    assert_eq!(harness.feed.publish_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stop_is_idempotent_without_a_running_sweep() {
    let mut harness = seeded_scheduler(&[], DefaultClock, SchedulerConfig::default()).await;

    harness.scheduler.stop();
    harness.scheduler.stop();

    assert!(!harness.scheduler.is_running());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn restart_replaces_the_previous_sweep_loop() {
    let due_at = chrono::Utc::now() - ChronoDuration::minutes(1);
    let item = item_with_status(ContentStatus::Scheduled, Some(due_at));
    let mut harness = seeded_scheduler(
        &[item],
        DefaultClock,
        SchedulerConfig::new(Duration::from_millis(10)),
    )
    .await;

    harness.scheduler.start();
    harness.scheduler.start();
    assert!(harness.scheduler.is_running());

    tokio::time::sleep(Duration::from_millis(200)).await;
    harness.scheduler.stop();

    assert_eq!(
        harness.feed.publish_count(),
        1,
        "only the replacement loop should have published"
    );
}
