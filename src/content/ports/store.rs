//! Store port for user-scoped content item persistence.

use crate::content::domain::{ContentId, ContentItem};
use crate::identity::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for content store operations.
pub type ContentStoreResult<T> = Result<T, ContentStoreError>;

/// Content item persistence contract.
///
/// Every operation is scoped to an owning user; an item created for one
/// user is invisible to every other user. Different deployments back this
/// port with local persistence or a remote service.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Returns the owner's items in creation order.
    async fn list(&self, owner: UserId) -> ContentStoreResult<Vec<ContentItem>>;

    /// Stores a new item.
    ///
    /// # Errors
    ///
    /// Returns [`ContentStoreError::DuplicateItem`] when the item ID
    /// already exists in the owner's collection.
    async fn create(&self, owner: UserId, item: &ContentItem) -> ContentStoreResult<ContentItem>;

    /// Persists changes to an existing item and returns the stored state.
    ///
    /// # Errors
    ///
    /// Returns [`ContentStoreError::NotFound`] when the item does not
    /// exist in the owner's collection.
    async fn update(&self, owner: UserId, item: &ContentItem) -> ContentStoreResult<ContentItem>;

    /// Removes an item.
    ///
    /// # Errors
    ///
    /// Returns [`ContentStoreError::NotFound`] when the item does not
    /// exist in the owner's collection.
    async fn delete(&self, owner: UserId, id: ContentId) -> ContentStoreResult<()>;

    /// Finds an item by identifier.
    ///
    /// Returns `None` when the item does not exist in the owner's
    /// collection.
    async fn find_by_id(
        &self,
        owner: UserId,
        id: ContentId,
    ) -> ContentStoreResult<Option<ContentItem>>;
}

/// Errors returned by content store implementations.
#[derive(Debug, Clone, Error)]
pub enum ContentStoreError {
    /// An item with the same identifier already exists.
    #[error("duplicate content item: {0}")]
    DuplicateItem(ContentId),

    /// The item was not found.
    #[error("content item not found: {0}")]
    NotFound(ContentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ContentStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
