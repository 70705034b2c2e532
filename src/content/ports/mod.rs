//! Port contracts for content lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by content
//! services.

pub mod feed;
pub mod generator;
pub mod images;
pub mod store;

pub use feed::ContentFeed;
pub use generator::{ContentGenerator, GeneratorError, GeneratorResult};
pub use images::{UserImageStore, UserImageStoreError, UserImageStoreResult};
pub use store::{ContentStore, ContentStoreError, ContentStoreResult};
