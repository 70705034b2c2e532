//! Service layer for content creation and user-driven lifecycle transitions.
//!
//! This service is the only component permitted to initiate user-driven or
//! generation-driven transitions; it wraps the domain transition validator
//! with persistence and ties generation results to items.

use crate::content::{
    domain::{ContentDomainError, ContentId, ContentItem, ContentType, Prompt, UserImage},
    ports::{ContentGenerator, ContentStore, ContentStoreError, GeneratorError},
    services::prompt::{self, PromptError},
};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for provider-backed content generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateContentRequest {
    content_type: ContentType,
    notes: String,
    links: Vec<String>,
    start_image: Option<UserImage>,
}

impl GenerateContentRequest {
    /// Creates a request from the user's notes brief.
    #[must_use]
    pub fn new(content_type: ContentType, notes: impl Into<String>) -> Self {
        Self {
            content_type,
            notes: notes.into(),
            links: Vec::new(),
            start_image: None,
        }
    }

    /// Sets reference links included in the prompt.
    #[must_use]
    pub fn with_links(mut self, links: impl IntoIterator<Item = String>) -> Self {
        self.links = links.into_iter().collect();
        self
    }

    /// Sets the start image seeding video generation.
    #[must_use]
    pub fn with_start_image(mut self, image: UserImage) -> Self {
        self.start_image = Some(image);
        self
    }
}

/// Result of an asynchronous generation reported back to the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Generation produced a payload reference.
    Succeeded {
        /// Opaque payload reference.
        data: String,
    },
    /// Generation failed with a diagnostic message.
    Failed {
        /// Human-readable diagnostic.
        message: String,
    },
}

impl GenerationOutcome {
    /// Creates a success outcome.
    #[must_use]
    pub fn succeeded(data: impl Into<String>) -> Self {
        Self::Succeeded { data: data.into() }
    }

    /// Creates a failure outcome.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// Service-level errors for content lifecycle operations.
#[derive(Debug, Error)]
pub enum ContentLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ContentDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] ContentStoreError),
    /// Generation provider failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    /// Prompt composition failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),
    /// No item exists with the given identifier.
    #[error("content item {0} not found")]
    NotFound(ContentId),
}

/// Result type for content lifecycle service operations.
pub type ContentLifecycleResult<T> = Result<T, ContentLifecycleError>;

/// Content lifecycle orchestration service, scoped to one user.
#[derive(Clone)]
pub struct ContentLifecycleService<S, G, C>
where
    S: ContentStore,
    G: ContentGenerator,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    generator: Arc<G>,
    clock: Arc<C>,
    owner: UserId,
}

impl<S, G, C> ContentLifecycleService<S, G, C>
where
    S: ContentStore,
    G: ContentGenerator,
    C: Clock + Send + Sync,
{
    /// Creates a lifecycle service for the given owner.
    #[must_use]
    pub const fn new(store: Arc<S>, generator: Arc<G>, clock: Arc<C>, owner: UserId) -> Self {
        Self {
            store,
            generator,
            clock,
            owner,
        }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the owner's items in creation order.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the store.
    pub async fn list(&self) -> ContentLifecycleResult<Vec<ContentItem>> {
        Ok(self.store.list(self.owner).await?)
    }

    /// Creates an item ready for review, or the generating placeholder for
    /// video.
    ///
    /// Text and image payloads are available synchronously, so those items
    /// enter the lifecycle pending review. Video enters as a placeholder;
    /// the payload reference is ignored until generation finalizes.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the store.
    pub async fn create_pending(
        &self,
        content_type: ContentType,
        prompt: Prompt,
        data: impl Into<String> + Send,
    ) -> ContentLifecycleResult<ContentItem> {
        let item = match content_type {
            ContentType::Video => ContentItem::new_generating(prompt, &*self.clock),
            ContentType::Text | ContentType::Image => {
                ContentItem::new_pending(content_type, prompt, data, &*self.clock)
            }
        };
        Ok(self.store.create(self.owner, &item).await?)
    }

    /// Applies a generation outcome to an in-flight placeholder.
    ///
    /// Returns `None` without error when the item no longer exists:
    /// generation may race with a concurrent delete, and the late result is
    /// dropped rather than recreated.
    ///
    /// # Errors
    ///
    /// Returns domain errors when the item is not generating and
    /// persistence errors from the store.
    pub async fn finalize_generation(
        &self,
        id: ContentId,
        outcome: GenerationOutcome,
    ) -> ContentLifecycleResult<Option<ContentItem>> {
        let Some(mut item) = self.store.find_by_id(self.owner, id).await? else {
            tracing::debug!(item = %id, "generation finalized after delete, dropping result");
            return Ok(None);
        };

        match outcome {
            GenerationOutcome::Succeeded { data } => item.mark_ready(data, &*self.clock)?,
            GenerationOutcome::Failed { message } => item.mark_failed(message, &*self.clock)?,
        }
        Ok(Some(self.store.update(self.owner, &item).await?))
    }

    /// Approves a pending item.
    ///
    /// # Errors
    ///
    /// Returns [`ContentLifecycleError::NotFound`] when no item has the
    /// given ID, domain errors for invalid transitions, and persistence
    /// errors from the store.
    pub async fn approve(&self, id: ContentId) -> ContentLifecycleResult<ContentItem> {
        let mut item = self.find_item_or_error(id).await?;
        item.approve(&*self.clock)?;
        Ok(self.store.update(self.owner, &item).await?)
    }

    /// Rejects a pending item.
    ///
    /// # Errors
    ///
    /// Returns [`ContentLifecycleError::NotFound`] when no item has the
    /// given ID, domain errors for invalid transitions, and persistence
    /// errors from the store.
    pub async fn reject(&self, id: ContentId) -> ContentLifecycleResult<ContentItem> {
        let mut item = self.find_item_or_error(id).await?;
        item.reject(&*self.clock)?;
        Ok(self.store.update(self.owner, &item).await?)
    }

    /// Queues an approved item for posting at `at`, or moves an already
    /// scheduled item to a new time.
    ///
    /// # Errors
    ///
    /// Returns [`ContentLifecycleError::NotFound`] when no item has the
    /// given ID, domain errors when `at` is not strictly future or the
    /// transition is invalid, and persistence errors from the store. The
    /// item is unchanged on failure.
    pub async fn schedule(
        &self,
        id: ContentId,
        at: DateTime<Utc>,
    ) -> ContentLifecycleResult<ContentItem> {
        let mut item = self.find_item_or_error(id).await?;
        item.schedule_at(at, &*self.clock)?;
        Ok(self.store.update(self.owner, &item).await?)
    }

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns [`ContentLifecycleError::NotFound`] when no item has the
    /// given ID, domain errors while the item is generating or scheduled,
    /// and persistence errors from the store.
    pub async fn delete(&self, id: ContentId) -> ContentLifecycleResult<()> {
        let item = self.find_item_or_error(id).await?;
        item.ensure_deletable()?;
        Ok(self.store.delete(self.owner, id).await?)
    }

    /// Generates a new item through the provider port.
    ///
    /// Text and image results are persisted pending review once the
    /// provider returns. Video persists a generating placeholder first and
    /// finalizes it from the provider outcome, so a provider failure is
    /// recorded on the item and also propagated to the caller.
    ///
    /// # Errors
    ///
    /// Returns prompt composition errors, provider errors, and persistence
    /// errors from the store. Failed text and image generations create no
    /// item.
    pub async fn generate(
        &self,
        request: GenerateContentRequest,
    ) -> ContentLifecycleResult<ContentItem> {
        let prompt = prompt::compose_post_prompt(&request.notes, &request.links)?;

        match request.content_type {
            ContentType::Text => {
                let data = self.generator.generate_text(&prompt).await?;
                self.create_pending(ContentType::Text, prompt, data).await
            }
            ContentType::Image => {
                let data = self.generator.generate_image(&prompt).await?;
                self.create_pending(ContentType::Image, prompt, data).await
            }
            ContentType::Video => {
                self.generate_video(prompt, request.start_image.as_ref())
                    .await
            }
        }
    }

    async fn generate_video(
        &self,
        prompt: Prompt,
        start_image: Option<&UserImage>,
    ) -> ContentLifecycleResult<ContentItem> {
        let placeholder = ContentItem::new_generating(prompt.clone(), &*self.clock);
        let mut item = self.store.create(self.owner, &placeholder).await?;

        item.update_progress("Rendering video", &*self.clock)?;
        let item = self.store.update(self.owner, &item).await?;

        match self.generator.generate_video(&prompt, start_image).await {
            Ok(data) => {
                let finalized = self
                    .finalize_generation(item.id(), GenerationOutcome::succeeded(data))
                    .await?;
                finalized.ok_or(ContentLifecycleError::NotFound(item.id()))
            }
            Err(error) => {
                self.finalize_generation(item.id(), GenerationOutcome::failed(error.to_string()))
                    .await?;
                Err(error.into())
            }
        }
    }

    async fn find_item_or_error(&self, id: ContentId) -> ContentLifecycleResult<ContentItem> {
        self.store
            .find_by_id(self.owner, id)
            .await?
            .ok_or(ContentLifecycleError::NotFound(id))
    }
}
