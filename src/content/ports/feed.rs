//! Feed port notified when the scheduler changes the collection.

use crate::content::domain::ContentItem;
use crate::identity::UserId;
use async_trait::async_trait;

/// Observer for scheduler-driven collection updates.
///
/// The scheduler publishes the owner's full updated collection after a
/// sweep that posted at least one item; sweeps that change nothing publish
/// nothing. Publication is fire-and-forget from the scheduler's point of
/// view.
#[async_trait]
pub trait ContentFeed: Send + Sync {
    /// Delivers the owner's updated collection.
    async fn publish(&self, owner: UserId, items: &[ContentItem]);
}
