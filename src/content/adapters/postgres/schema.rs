//! Diesel schema for content item persistence.

diesel::table! {
    /// Generated content items moving through review and scheduling.
    content_items (id) {
        /// Content item identifier.
        id -> Uuid,
        /// Owning user identifier.
        owner_id -> Uuid,
        /// Content kind.
        #[max_length = 20]
        content_type -> Varchar,
        /// Generation prompt text.
        prompt -> Text,
        /// Opaque payload reference, absent while generating.
        data -> Nullable<Text>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Scheduled posting time, present only while scheduled.
        schedule -> Nullable<Timestamptz>,
        /// Progress or error text.
        error_message -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
