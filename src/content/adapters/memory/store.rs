//! In-memory content store for lifecycle tests and local sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::content::{
    domain::{ContentId, ContentItem},
    ports::{ContentStore, ContentStoreError, ContentStoreResult},
};
use crate::identity::UserId;

/// Thread-safe in-memory content store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    collections: HashMap<UserId, HashMap<ContentId, ContentItem>>,
}

impl InMemoryContentStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ContentStoreError {
    ContentStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn list(&self, owner: UserId) -> ContentStoreResult<Vec<ContentItem>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut items: Vec<ContentItem> = state
            .collections
            .get(&owner)
            .map(|collection| collection.values().cloned().collect())
            .unwrap_or_default();
        items.sort_by_key(|item| (item.created_at(), item.id().into_inner()));
        Ok(items)
    }

    async fn create(&self, owner: UserId, item: &ContentItem) -> ContentStoreResult<ContentItem> {
        let mut state = self.state.write().map_err(lock_error)?;
        let collection = state.collections.entry(owner).or_default();
        if collection.contains_key(&item.id()) {
            return Err(ContentStoreError::DuplicateItem(item.id()));
        }
        collection.insert(item.id(), item.clone());
        Ok(item.clone())
    }

    async fn update(&self, owner: UserId, item: &ContentItem) -> ContentStoreResult<ContentItem> {
        let mut state = self.state.write().map_err(lock_error)?;
        let collection = state
            .collections
            .get_mut(&owner)
            .ok_or(ContentStoreError::NotFound(item.id()))?;
        if !collection.contains_key(&item.id()) {
            return Err(ContentStoreError::NotFound(item.id()));
        }
        collection.insert(item.id(), item.clone());
        Ok(item.clone())
    }

    async fn delete(&self, owner: UserId, id: ContentId) -> ContentStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .collections
            .get_mut(&owner)
            .and_then(|collection| collection.remove(&id));
        if removed.is_none() {
            return Err(ContentStoreError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        owner: UserId,
        id: ContentId,
    ) -> ContentStoreResult<Option<ContentItem>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .collections
            .get(&owner)
            .and_then(|collection| collection.get(&id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::domain::{ContentType, Prompt};
    use mockable::DefaultClock;

    fn text_item(clock: &DefaultClock) -> ContentItem {
        let prompt = Prompt::new("store test").expect("valid prompt");
        ContentItem::new_pending(ContentType::Text, prompt, "copy", clock)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn duplicate_create_is_rejected() {
        let store = InMemoryContentStore::new();
        let owner = UserId::new();
        let item = text_item(&DefaultClock);

        store.create(owner, &item).await.expect("first create");
        let result = store.create(owner, &item).await;

        assert!(matches!(result, Err(ContentStoreError::DuplicateItem(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn update_of_missing_item_is_not_found() {
        let store = InMemoryContentStore::new();
        let result = store.update(UserId::new(), &text_item(&DefaultClock)).await;

        assert!(matches!(result, Err(ContentStoreError::NotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn collections_are_isolated_per_user() {
        let store = InMemoryContentStore::new();
        let alice = UserId::new();
        let bob = UserId::new();
        let item = text_item(&DefaultClock);
        store.create(alice, &item).await.expect("create");

        let bob_items = store.list(bob).await.expect("list");
        assert!(bob_items.is_empty());
        assert!(
            store
                .find_by_id(bob, item.id())
                .await
                .expect("lookup")
                .is_none()
        );

        let alice_items = store.list(alice).await.expect("list");
        assert_eq!(alice_items.len(), 1);
    }
}
