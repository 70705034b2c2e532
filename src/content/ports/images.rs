//! Store port for the user's uploaded image library.

use crate::content::domain::{UserImage, UserImageId};
use crate::identity::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user image store operations.
pub type UserImageStoreResult<T> = Result<T, UserImageStoreError>;

/// Uploaded image persistence contract, scoped to an owning user.
#[async_trait]
pub trait UserImageStore: Send + Sync {
    /// Returns the owner's uploaded images.
    async fn list(&self, owner: UserId) -> UserImageStoreResult<Vec<UserImage>>;

    /// Adds an image to the owner's library.
    async fn add(&self, owner: UserId, image: &UserImage) -> UserImageStoreResult<()>;

    /// Removes an image from the owner's library.
    ///
    /// # Errors
    ///
    /// Returns [`UserImageStoreError::NotFound`] when the image does not
    /// exist in the owner's library.
    async fn remove(&self, owner: UserId, id: UserImageId) -> UserImageStoreResult<()>;

    /// Finds an image by identifier.
    ///
    /// Returns `None` when the image does not exist in the owner's
    /// library.
    async fn find_by_id(
        &self,
        owner: UserId,
        id: UserImageId,
    ) -> UserImageStoreResult<Option<UserImage>>;
}

/// Errors returned by user image store implementations.
#[derive(Debug, Clone, Error)]
pub enum UserImageStoreError {
    /// The image was not found.
    #[error("user image not found: {0}")]
    NotFound(UserImageId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserImageStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
