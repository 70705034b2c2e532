//! User-uploaded image library entries.

use super::{ContentDomainError, UserImageId};
use serde::{Deserialize, Serialize};

/// An uploaded image available as a video start frame.
///
/// The `url` is an opaque reference into external object storage; the
/// domain never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserImage {
    id: UserImageId,
    name: String,
    url: String,
}

impl UserImage {
    /// Creates a library entry for an uploaded image.
    ///
    /// # Errors
    ///
    /// Returns [`ContentDomainError::EmptyImageName`] when the name is
    /// empty after trimming.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, ContentDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ContentDomainError::EmptyImageName);
        }
        Ok(Self {
            id: UserImageId::new(),
            name,
            url: url.into(),
        })
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: UserImageId, name: String, url: String) -> Self {
        Self { id, name, url }
    }

    /// Returns the image identifier.
    #[must_use]
    pub const fn id(&self) -> UserImageId {
        self.id
    }

    /// Returns the original file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the storage reference.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}
