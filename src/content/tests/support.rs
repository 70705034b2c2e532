//! Shared fixtures for content lifecycle tests.

use crate::content::domain::{
    ContentId, ContentItem, ContentStatus, ContentType, PersistedContentData, Prompt,
};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a single instant for deterministic lifecycle tests.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Returns a fixed timestamp at the given hour and minute.
pub fn instant(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

/// Builds an item directly in the given status, as if rehydrated from
/// persistence.
pub fn item_with_status(status: ContentStatus, schedule: Option<DateTime<Utc>>) -> ContentItem {
    let created = instant(8, 0);
    let (content_type, data, error_message) = match status {
        ContentStatus::Generating => (ContentType::Video, None, Some("Rendering video".to_owned())),
        ContentStatus::Error => (
            ContentType::Video,
            None,
            Some("generation failed".to_owned()),
        ),
        _ => (
            ContentType::Text,
            Some("store://generated/post".to_owned()),
            None,
        ),
    };

    ContentItem::from_persisted(PersistedContentData {
        id: ContentId::new(),
        content_type,
        prompt: Prompt::new("support fixture").expect("valid prompt"),
        data,
        status,
        schedule,
        error_message,
        created_at: created,
        updated_at: created,
    })
}
