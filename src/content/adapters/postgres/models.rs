//! Diesel row models for content item persistence.

use super::schema::content_items;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for content item records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = content_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ContentItemRow {
    /// Content item identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Content kind.
    pub content_type: String,
    /// Generation prompt text.
    pub prompt: String,
    /// Opaque payload reference.
    pub data: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Scheduled posting time.
    pub schedule: Option<DateTime<Utc>>,
    /// Progress or error text.
    pub error_message: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for content item records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = content_items)]
pub struct NewContentItemRow {
    /// Content item identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Content kind.
    pub content_type: String,
    /// Generation prompt text.
    pub prompt: String,
    /// Opaque payload reference.
    pub data: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Scheduled posting time.
    pub schedule: Option<DateTime<Utc>>,
    /// Progress or error text.
    pub error_message: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model for the mutable columns of a content item record.
///
/// `None` clears the column: transitioning out of `scheduled` must null
/// the schedule, and a successful generation must null the progress text.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = content_items, treat_none_as_null = true)]
pub struct ContentItemChanges {
    /// Lifecycle status.
    pub status: String,
    /// Opaque payload reference.
    pub data: Option<String>,
    /// Scheduled posting time.
    pub schedule: Option<DateTime<Utc>>,
    /// Progress or error text.
    pub error_message: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
