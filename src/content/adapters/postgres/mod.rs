//! `PostgreSQL` adapters for content item persistence.

mod models;
mod schema;
mod store;

pub use store::{ContentPgPool, PostgresContentStore};
