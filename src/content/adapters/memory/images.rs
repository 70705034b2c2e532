//! In-memory user image library for tests and local sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::content::{
    domain::{UserImage, UserImageId},
    ports::{UserImageStore, UserImageStoreError, UserImageStoreResult},
};
use crate::identity::UserId;

/// Thread-safe in-memory user image store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserImageStore {
    state: Arc<RwLock<HashMap<UserId, Vec<UserImage>>>>,
}

impl InMemoryUserImageStore {
    /// Creates an empty in-memory image store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> UserImageStoreError {
    UserImageStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserImageStore for InMemoryUserImageStore {
    async fn list(&self, owner: UserId) -> UserImageStoreResult<Vec<UserImage>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&owner).cloned().unwrap_or_default())
    }

    async fn add(&self, owner: UserId, image: &UserImage) -> UserImageStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.entry(owner).or_default().push(image.clone());
        Ok(())
    }

    async fn remove(&self, owner: UserId, id: UserImageId) -> UserImageStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let library = state
            .get_mut(&owner)
            .ok_or(UserImageStoreError::NotFound(id))?;
        let before = library.len();
        library.retain(|image| image.id() != id);
        if library.len() == before {
            return Err(UserImageStoreError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        owner: UserId,
        id: UserImageId,
    ) -> UserImageStoreResult<Option<UserImage>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .get(&owner)
            .and_then(|library| library.iter().find(|image| image.id() == id))
            .cloned())
    }
}
