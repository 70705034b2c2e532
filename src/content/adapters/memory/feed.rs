//! Recording feed adapter for scheduler tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::content::{domain::ContentItem, ports::ContentFeed};
use crate::identity::UserId;

/// Feed adapter that records every published snapshot.
#[derive(Debug, Clone, Default)]
pub struct RecordingContentFeed {
    snapshots: Arc<RwLock<Vec<Vec<ContentItem>>>>,
}

impl RecordingContentFeed {
    /// Creates a feed with no recorded snapshots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many snapshots have been published.
    #[must_use]
    pub fn publish_count(&self) -> usize {
        self.snapshots.read().map_or(0, |snapshots| snapshots.len())
    }

    /// Returns the most recently published snapshot, if any.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<Vec<ContentItem>> {
        self.snapshots
            .read()
            .ok()
            .and_then(|snapshots| snapshots.last().cloned())
    }
}

#[async_trait]
impl ContentFeed for RecordingContentFeed {
    async fn publish(&self, _owner: UserId, items: &[ContentItem]) {
        if let Ok(mut snapshots) = self.snapshots.write() {
            snapshots.push(items.to_vec());
        }
    }
}
