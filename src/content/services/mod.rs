//! Application services for content lifecycle orchestration.

mod images;
mod lifecycle;
pub mod prompt;
mod scheduler;
mod session;

pub use images::{ImageLibraryError, ImageLibraryResult, ImageLibraryService};
pub use lifecycle::{
    ContentLifecycleError, ContentLifecycleResult, ContentLifecycleService, GenerateContentRequest,
    GenerationOutcome,
};
pub use prompt::{PromptError, compose_post_prompt};
pub use scheduler::{ContentScheduler, SchedulerConfig, SchedulerError, due_item_ids};
pub use session::{ContentSession, SessionError, SessionResources};
