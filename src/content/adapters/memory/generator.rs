//! In-memory generation provider for lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::content::{
    domain::{ContentType, Prompt, UserImage, UserImageId},
    ports::{ContentGenerator, GeneratorError, GeneratorResult},
};

/// In-memory generation provider.
///
/// Returns canned payload references per content type and supports
/// injecting a failure for any type. Suitable for unit tests and local
/// deterministic flows; no external provider is contacted.
#[derive(Debug, Clone)]
pub struct InMemoryContentGenerator {
    state: Arc<RwLock<GeneratorState>>,
}

#[derive(Debug)]
struct GeneratorState {
    outputs: HashMap<ContentType, String>,
    failures: HashMap<ContentType, GeneratorError>,
    last_video_start_image: Option<UserImageId>,
}

impl Default for InMemoryContentGenerator {
    fn default() -> Self {
        let outputs = HashMap::from([
            (ContentType::Text, "Generated post copy.".to_owned()),
            (ContentType::Image, "mem://generated/image".to_owned()),
            (ContentType::Video, "mem://generated/video".to_owned()),
        ]);
        Self {
            state: Arc::new(RwLock::new(GeneratorState {
                outputs,
                failures: HashMap::new(),
                last_video_start_image: None,
            })),
        }
    }
}

impl InMemoryContentGenerator {
    /// Creates a generator with canned default outputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the canned output for a content type.
    ///
    /// # Errors
    ///
    /// Returns provider errors when lock acquisition fails.
    pub fn set_output(
        &self,
        content_type: ContentType,
        output: impl Into<String>,
    ) -> GeneratorResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.outputs.insert(content_type, output.into());
        Ok(())
    }

    /// Makes every generation of `content_type` fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns provider errors when lock acquisition fails.
    pub fn fail_with(&self, content_type: ContentType, error: GeneratorError) -> GeneratorResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failures.insert(content_type, error);
        Ok(())
    }

    /// Returns the start image passed to the most recent video generation.
    ///
    /// # Errors
    ///
    /// Returns provider errors when lock acquisition fails.
    pub fn last_video_start_image(&self) -> GeneratorResult<Option<UserImageId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.last_video_start_image)
    }

    fn produce(&self, content_type: ContentType) -> GeneratorResult<String> {
        let state = self.state.read().map_err(lock_error)?;
        if let Some(error) = state.failures.get(&content_type) {
            return Err(error.clone());
        }
        Ok(state
            .outputs
            .get(&content_type)
            .cloned()
            .unwrap_or_default())
    }
}

fn lock_error(err: impl ToString) -> GeneratorError {
    GeneratorError::Provider(err.to_string())
}

#[async_trait]
impl ContentGenerator for InMemoryContentGenerator {
    async fn generate_text(&self, _prompt: &Prompt) -> GeneratorResult<String> {
        self.produce(ContentType::Text)
    }

    async fn generate_image(&self, _prompt: &Prompt) -> GeneratorResult<String> {
        self.produce(ContentType::Image)
    }

    async fn generate_video(
        &self,
        _prompt: &Prompt,
        start_image: Option<&UserImage>,
    ) -> GeneratorResult<String> {
        {
            let mut state = self.state.write().map_err(lock_error)?;
            state.last_video_start_image = start_image.map(UserImage::id);
        }
        self.produce(ContentType::Video)
    }
}
