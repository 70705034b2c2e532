//! Adapter implementations of the content ports.

pub mod memory;
pub mod postgres;

pub use memory::{
    InMemoryContentGenerator, InMemoryContentStore, InMemoryUserImageStore, RecordingContentFeed,
};
pub use postgres::{ContentPgPool, PostgresContentStore};
