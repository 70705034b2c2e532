//! Service layer for the user's uploaded image library.

use crate::content::{
    domain::{ContentDomainError, UserImage, UserImageId},
    ports::{UserImageStore, UserImageStoreError},
};
use crate::identity::UserId;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for image library operations.
#[derive(Debug, Error)]
pub enum ImageLibraryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ContentDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] UserImageStoreError),
}

/// Result type for image library service operations.
pub type ImageLibraryResult<T> = Result<T, ImageLibraryError>;

/// Uploaded image library, scoped to one user.
#[derive(Clone)]
pub struct ImageLibraryService<R>
where
    R: UserImageStore,
{
    images: Arc<R>,
    owner: UserId,
}

impl<R> ImageLibraryService<R>
where
    R: UserImageStore,
{
    /// Creates an image library service for the given owner.
    #[must_use]
    pub const fn new(images: Arc<R>, owner: UserId) -> Self {
        Self { images, owner }
    }

    /// Records an uploaded image in the owner's library.
    ///
    /// # Errors
    ///
    /// Returns domain validation errors for a blank name and persistence
    /// errors from the store.
    pub async fn add_image(
        &self,
        name: impl Into<String> + Send,
        url: impl Into<String> + Send,
    ) -> ImageLibraryResult<UserImage> {
        let image = UserImage::new(name, url)?;
        self.images.add(self.owner, &image).await?;
        Ok(image)
    }

    /// Returns the owner's uploaded images.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the store.
    pub async fn list_images(&self) -> ImageLibraryResult<Vec<UserImage>> {
        Ok(self.images.list(self.owner).await?)
    }

    /// Removes an image from the owner's library.
    ///
    /// # Errors
    ///
    /// Returns [`UserImageStoreError::NotFound`] when the image does not
    /// exist and persistence errors from the store.
    pub async fn remove_image(&self, id: UserImageId) -> ImageLibraryResult<()> {
        Ok(self.images.remove(self.owner, id).await?)
    }

    /// Finds an image by identifier.
    ///
    /// Returns `None` when the image does not exist in the owner's
    /// library.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the store.
    pub async fn find_image(&self, id: UserImageId) -> ImageLibraryResult<Option<UserImage>> {
        Ok(self.images.find_by_id(self.owner, id).await?)
    }
}
