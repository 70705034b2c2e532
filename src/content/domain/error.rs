//! Error types for content domain validation and parsing.

use super::{ContentId, ContentStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating domain content values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentDomainError {
    /// The requested status change is not permitted from the current state.
    #[error("invalid status transition for item {item_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Item identifier.
        item_id: ContentId,
        /// Current lifecycle status.
        from: ContentStatus,
        /// Requested lifecycle status.
        to: ContentStatus,
    },

    /// The requested schedule time is not strictly in the future.
    #[error("schedule time {schedule} for item {item_id} is not after {now}")]
    ScheduleNotInFuture {
        /// Item identifier.
        item_id: ContentId,
        /// Requested schedule time.
        schedule: DateTime<Utc>,
        /// Clock reading at the moment of the request.
        now: DateTime<Utc>,
    },

    /// Deletion is not permitted from the item's current status.
    #[error("item {item_id} cannot be deleted while {status}")]
    DeleteNotPermitted {
        /// Item identifier.
        item_id: ContentId,
        /// Current lifecycle status.
        status: ContentStatus,
    },

    /// Progress text may only change while generation is in flight.
    #[error("item {item_id} is {status}, progress updates require generating")]
    ProgressOutsideGeneration {
        /// Item identifier.
        item_id: ContentId,
        /// Current lifecycle status.
        status: ContentStatus,
    },

    /// The prompt text is empty after trimming.
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// The user image name is empty after trimming.
    #[error("image name must not be empty")]
    EmptyImageName,
}

/// Error returned while parsing content statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown content status: {0}")]
pub struct ParseContentStatusError(pub String);

/// Error returned while parsing content types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown content type: {0}")]
pub struct ParseContentTypeError(pub String);
