//! Generation provider port for text, image, and video content.

use crate::content::domain::{Prompt, UserImage};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for generation provider operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Generation backend contract.
///
/// Each method returns an opaque payload reference (a URL or inline
/// content); producing and storing the binary artifact is the provider's
/// concern.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generates post copy for the prompt.
    async fn generate_text(&self, prompt: &Prompt) -> GeneratorResult<String>;

    /// Generates a still image for the prompt.
    async fn generate_image(&self, prompt: &Prompt) -> GeneratorResult<String>;

    /// Generates a short video for the prompt, optionally seeded with a
    /// start image from the user's library.
    async fn generate_video(
        &self,
        prompt: &Prompt,
        start_image: Option<&UserImage>,
    ) -> GeneratorResult<String>;
}

/// Errors returned by generation provider adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// Video generation requires an API key to be selected first.
    #[error("Please select an API key to generate videos.")]
    ApiKeyRequired,

    /// The selected API key was rejected by the provider.
    #[error("Your API key is invalid. Please select a new one.")]
    ApiKeyInvalid,

    /// Generic provider failure.
    #[error("content provider error: {0}")]
    Provider(String),
}
