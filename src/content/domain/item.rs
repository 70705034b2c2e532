//! Content item aggregate root and its lifecycle state machine.

use super::{ContentDomainError, ContentId, ParseContentStatusError, ParseContentTypeError, Prompt};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of generated content carried by an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Written post copy.
    Text,
    /// Still image.
    Image,
    /// Short-form video.
    Video,
}

impl ContentType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ContentType {
    type Error = ParseContentTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            _ => Err(ParseContentTypeError(value.to_owned())),
        }
    }
}

/// Lifecycle status of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    /// Generation is in flight; the payload reference is not yet available.
    Generating,
    /// Generated and awaiting review.
    Pending,
    /// Approved for publication.
    Approved,
    /// Rejected during review.
    Rejected,
    /// Approved and queued for automatic posting at a future time.
    Scheduled,
    /// Published.
    Posted,
    /// Generation failed.
    Error,
}

impl ContentStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generating => "generating",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Scheduled => "scheduled",
            Self::Posted => "posted",
            Self::Error => "error",
        }
    }

    /// Returns whether transition to `target` is allowed.
    ///
    /// `Scheduled -> Scheduled` re-enters the scheduling transition to
    /// overwrite the schedule time; every other self-transition is refused.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Generating, Self::Pending | Self::Error)
                | (Self::Pending, Self::Approved | Self::Rejected)
                | (Self::Approved, Self::Scheduled)
                | (Self::Scheduled, Self::Scheduled | Self::Posted)
        )
    }

    /// Returns whether the status permits no further transition.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Posted | Self::Error)
    }

    /// Returns whether an item may be deleted from this status.
    ///
    /// Items mid-generation or queued for posting cannot vanish silently; a
    /// scheduled item must post before it can be removed.
    #[must_use]
    pub const fn allows_delete(self) -> bool {
        matches!(
            self,
            Self::Pending | Self::Approved | Self::Rejected | Self::Posted | Self::Error
        )
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ContentStatus {
    type Error = ParseContentStatusError;

    fn try_from(value: &str) -> Result<Self, ParseContentStatusError> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "generating" => Ok(Self::Generating),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "scheduled" => Ok(Self::Scheduled),
            "posted" => Ok(Self::Posted),
            "error" => Ok(Self::Error),
            _ => Err(ParseContentStatusError(value.to_owned())),
        }
    }
}

/// Content item aggregate root.
///
/// The `schedule` field is set if and only if the status is
/// [`ContentStatus::Scheduled`]; `error_message` carries transient progress
/// text while generating and the diagnostic after a failed generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    id: ContentId,
    content_type: ContentType,
    prompt: Prompt,
    data: Option<String>,
    status: ContentStatus,
    schedule: Option<DateTime<Utc>>,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedContentData {
    /// Persisted item identifier.
    pub id: ContentId,
    /// Persisted content kind.
    pub content_type: ContentType,
    /// Persisted generation prompt.
    pub prompt: Prompt,
    /// Persisted payload reference, if generation has completed.
    pub data: Option<String>,
    /// Persisted lifecycle status.
    pub status: ContentStatus,
    /// Persisted schedule time, if any.
    pub schedule: Option<DateTime<Utc>>,
    /// Persisted progress or error text, if any.
    pub error_message: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    /// Creates an item whose payload is already available for review.
    ///
    /// Text and image generation complete synchronously from the domain's
    /// point of view, so those items enter the lifecycle in
    /// [`ContentStatus::Pending`].
    #[must_use]
    pub fn new_pending(
        content_type: ContentType,
        prompt: Prompt,
        data: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ContentId::new(),
            content_type,
            prompt,
            data: Some(data.into()),
            status: ContentStatus::Pending,
            schedule: None,
            error_message: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Creates a placeholder for an in-flight video generation.
    #[must_use]
    pub fn new_generating(prompt: Prompt, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ContentId::new(),
            content_type: ContentType::Video,
            prompt,
            data: None,
            status: ContentStatus::Generating,
            schedule: None,
            error_message: Some("Initializing video generation".to_owned()),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an item from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedContentData) -> Self {
        Self {
            id: data.id,
            content_type: data.content_type,
            prompt: data.prompt,
            data: data.data,
            status: data.status,
            schedule: data.schedule,
            error_message: data.error_message,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> ContentId {
        self.id
    }

    /// Returns the content kind.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Returns the generation prompt.
    #[must_use]
    pub const fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// Returns the payload reference, if generation has completed.
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ContentStatus {
        self.status
    }

    /// Returns the schedule time, if the item is scheduled.
    #[must_use]
    pub const fn schedule(&self) -> Option<DateTime<Utc>> {
        self.schedule
    }

    /// Returns the progress or error text, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether a scheduled item has reached its posting time.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == ContentStatus::Scheduled
            && self.schedule.is_some_and(|schedule| schedule <= now)
    }

    /// Records a successful generation, moving the item to review.
    ///
    /// # Errors
    ///
    /// Returns [`ContentDomainError::InvalidStatusTransition`] unless the
    /// item is currently generating.
    pub fn mark_ready(
        &mut self,
        data: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), ContentDomainError> {
        self.transition_to(ContentStatus::Pending)?;
        self.data = Some(data.into());
        self.error_message = None;
        self.touch(clock);
        Ok(())
    }

    /// Records a failed generation with its diagnostic message.
    ///
    /// # Errors
    ///
    /// Returns [`ContentDomainError::InvalidStatusTransition`] unless the
    /// item is currently generating.
    pub fn mark_failed(
        &mut self,
        message: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), ContentDomainError> {
        self.transition_to(ContentStatus::Error)?;
        self.error_message = Some(message.into());
        self.touch(clock);
        Ok(())
    }

    /// Replaces the transient progress text of an in-flight generation.
    ///
    /// # Errors
    ///
    /// Returns [`ContentDomainError::ProgressOutsideGeneration`] when the
    /// item is not generating.
    pub fn update_progress(
        &mut self,
        message: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), ContentDomainError> {
        if self.status != ContentStatus::Generating {
            return Err(ContentDomainError::ProgressOutsideGeneration {
                item_id: self.id,
                status: self.status,
            });
        }
        self.error_message = Some(message.into());
        self.touch(clock);
        Ok(())
    }

    /// Approves a pending item.
    ///
    /// # Errors
    ///
    /// Returns [`ContentDomainError::InvalidStatusTransition`] unless the
    /// item is pending review.
    pub fn approve(&mut self, clock: &impl Clock) -> Result<(), ContentDomainError> {
        self.transition_to(ContentStatus::Approved)?;
        self.touch(clock);
        Ok(())
    }

    /// Rejects a pending item.
    ///
    /// # Errors
    ///
    /// Returns [`ContentDomainError::InvalidStatusTransition`] unless the
    /// item is pending review.
    pub fn reject(&mut self, clock: &impl Clock) -> Result<(), ContentDomainError> {
        self.transition_to(ContentStatus::Rejected)?;
        self.touch(clock);
        Ok(())
    }

    /// Queues an approved item for posting at `at`, or moves an already
    /// scheduled item to a new time.
    ///
    /// # Errors
    ///
    /// Returns [`ContentDomainError::ScheduleNotInFuture`] when `at` is not
    /// strictly after the clock's current time, or
    /// [`ContentDomainError::InvalidStatusTransition`] when the item is
    /// neither approved nor already scheduled. The item is unchanged on
    /// either failure.
    pub fn schedule_at(
        &mut self,
        at: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Result<(), ContentDomainError> {
        let now = clock.utc();
        if at <= now {
            return Err(ContentDomainError::ScheduleNotInFuture {
                item_id: self.id,
                schedule: at,
                now,
            });
        }
        self.transition_to(ContentStatus::Scheduled)?;
        self.schedule = Some(at);
        self.touch(clock);
        Ok(())
    }

    /// Marks a due scheduled item as posted and clears its schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ContentDomainError::InvalidStatusTransition`] unless the
    /// item is scheduled.
    pub fn mark_posted(&mut self, clock: &impl Clock) -> Result<(), ContentDomainError> {
        self.transition_to(ContentStatus::Posted)?;
        self.schedule = None;
        self.touch(clock);
        Ok(())
    }

    /// Validates that the item may be deleted from its current status.
    ///
    /// # Errors
    ///
    /// Returns [`ContentDomainError::DeleteNotPermitted`] while generating
    /// or while queued for posting.
    pub const fn ensure_deletable(&self) -> Result<(), ContentDomainError> {
        if self.status.allows_delete() {
            return Ok(());
        }
        Err(ContentDomainError::DeleteNotPermitted {
            item_id: self.id,
            status: self.status,
        })
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }

    fn transition_to(&mut self, target: ContentStatus) -> Result<(), ContentDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(ContentDomainError::InvalidStatusTransition {
                item_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use mockable::DefaultClock;

    fn pending_item(clock: &DefaultClock) -> ContentItem {
        let prompt = Prompt::new("launch announcement").expect("valid prompt");
        ContentItem::new_pending(ContentType::Text, prompt, "post copy", clock)
    }

    #[test]
    fn pending_item_starts_with_payload_and_no_schedule() {
        let clock = DefaultClock;
        let item = pending_item(&clock);

        assert_eq!(item.status(), ContentStatus::Pending);
        assert_eq!(item.data(), Some("post copy"));
        assert!(item.schedule().is_none());
        assert!(item.error_message().is_none());
    }

    #[test]
    fn generating_item_starts_with_progress_text() {
        let clock = DefaultClock;
        let prompt = Prompt::new("teaser clip").expect("valid prompt");
        let item = ContentItem::new_generating(prompt, &clock);

        assert_eq!(item.status(), ContentStatus::Generating);
        assert_eq!(item.content_type(), ContentType::Video);
        assert!(item.data().is_none());
        assert!(item.error_message().is_some());
    }

    #[test]
    fn mark_ready_sets_payload_and_clears_progress() {
        let clock = DefaultClock;
        let prompt = Prompt::new("teaser clip").expect("valid prompt");
        let mut item = ContentItem::new_generating(prompt, &clock);

        item.mark_ready("store://videos/teaser", &clock)
            .expect("ready transition should succeed");

        assert_eq!(item.status(), ContentStatus::Pending);
        assert_eq!(item.data(), Some("store://videos/teaser"));
        assert!(item.error_message().is_none());
    }

    #[test]
    fn schedule_at_rejects_past_time_without_mutation() {
        let clock = DefaultClock;
        let mut item = pending_item(&clock);
        item.approve(&clock).expect("approve should succeed");
        let past = Utc::now() - Duration::minutes(5);

        let result = item.schedule_at(past, &clock);

        assert!(matches!(
            result,
            Err(ContentDomainError::ScheduleNotInFuture { .. })
        ));
        assert_eq!(item.status(), ContentStatus::Approved);
        assert!(item.schedule().is_none());
    }

    #[test]
    fn rescheduling_overwrites_the_schedule_time() {
        let clock = DefaultClock;
        let mut item = pending_item(&clock);
        item.approve(&clock).expect("approve should succeed");
        let first = Utc::now() + Duration::hours(1);
        let second = Utc::now() + Duration::hours(2);

        item.schedule_at(first, &clock).expect("first schedule");
        item.schedule_at(second, &clock).expect("reschedule");

        assert_eq!(item.status(), ContentStatus::Scheduled);
        assert_eq!(item.schedule(), Some(second));
    }

    #[test]
    fn mark_posted_clears_the_schedule() {
        let clock = DefaultClock;
        let mut item = pending_item(&clock);
        item.approve(&clock).expect("approve should succeed");
        item.schedule_at(Utc::now() + Duration::hours(1), &clock)
            .expect("schedule should succeed");

        item.mark_posted(&clock).expect("post transition");

        assert_eq!(item.status(), ContentStatus::Posted);
        assert!(item.schedule().is_none());
    }

    #[test]
    fn is_due_includes_the_exact_boundary_instant() {
        let clock = DefaultClock;
        let mut item = pending_item(&clock);
        item.approve(&clock).expect("approve should succeed");
        let at = Utc::now() + Duration::hours(1);
        item.schedule_at(at, &clock).expect("schedule");

        assert!(item.is_due(at));
        assert!(item.is_due(at + Duration::seconds(1)));
        assert!(!item.is_due(at - Duration::seconds(1)));
    }

    #[test]
    fn update_progress_requires_generating_status() {
        let clock = DefaultClock;
        let mut item = pending_item(&clock);

        let result = item.update_progress("still working", &clock);

        assert!(matches!(
            result,
            Err(ContentDomainError::ProgressOutsideGeneration { .. })
        ));
        assert!(item.error_message().is_none());
    }

    #[test]
    fn schedule_serializes_as_iso_8601() {
        let clock = DefaultClock;
        let mut item = pending_item(&clock);
        item.approve(&clock).expect("approve should succeed");
        let at = Utc::now() + Duration::hours(3);
        item.schedule_at(at, &clock).expect("schedule");

        let value = serde_json::to_value(&item).expect("serialization should succeed");
        let raw = value
            .get("schedule")
            .and_then(serde_json::Value::as_str)
            .expect("schedule should serialize as a string");

        let parsed = chrono::DateTime::parse_from_rfc3339(raw)
            .expect("schedule string should parse as ISO-8601");
        assert_eq!(parsed.with_timezone(&Utc), at);
    }
}
