//! Prompt composition from the user's notes and reference links.

use crate::content::domain::{ContentDomainError, Prompt};
use minijinja::Environment;
use serde_json::{Map, Value};
use thiserror::Error;

/// Template rendered into the generation prompt.
const POST_BRIEF_TEMPLATE: &str = "**Personal notes:**\n{{ notes }}\n\n\
{% if links %}**Reference links:**\n{{ links }}\n\n{% endif %}\
Based on the information above, please generate a social media post.";

/// Errors returned while composing a generation prompt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptError {
    /// The notes brief is empty after trimming.
    #[error("context notes must not be empty")]
    EmptyNotes,

    /// Template rendering failed.
    #[error("prompt template rendering failed: {0}")]
    TemplateRender(String),

    /// Prompt validation failed.
    #[error(transparent)]
    Domain(#[from] ContentDomainError),
}

/// Composes the generation prompt from the user's notes and links.
///
/// # Errors
///
/// Returns [`PromptError::EmptyNotes`] when the brief is blank and
/// [`PromptError::TemplateRender`] when rendering fails.
pub fn compose_post_prompt(notes: &str, links: &[String]) -> Result<Prompt, PromptError> {
    if notes.trim().is_empty() {
        return Err(PromptError::EmptyNotes);
    }

    let environment = Environment::new();
    let rendered = environment
        .render_str(POST_BRIEF_TEMPLATE, build_prompt_context(notes, links))
        .map_err(|error| PromptError::TemplateRender(error.to_string()))?;
    Ok(Prompt::new(rendered)?)
}

fn build_prompt_context(notes: &str, links: &[String]) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert("notes".to_owned(), Value::String(notes.to_owned()));
    context.insert("links".to_owned(), Value::String(links.join("\n")));
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_prompt_carries_notes_and_links() {
        let links = vec!["https://example.com/launch".to_owned()];
        let prompt =
            compose_post_prompt("Eco product line launch", &links).expect("composition succeeds");

        assert!(prompt.as_str().contains("Eco product line launch"));
        assert!(prompt.as_str().contains("https://example.com/launch"));
        assert!(prompt.as_str().contains("social media post"));
    }

    #[test]
    fn links_section_is_omitted_when_empty() {
        let prompt = compose_post_prompt("Launch notes", &[]).expect("composition succeeds");

        assert!(!prompt.as_str().contains("Reference links"));
    }

    #[test]
    fn blank_notes_are_rejected() {
        let result = compose_post_prompt("   ", &[]);

        assert_eq!(result, Err(PromptError::EmptyNotes));
    }
}
