//! Diesel schema for board persistence.

diesel::table! {
    /// Board task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 500]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Ordered checklist payload.
        checklist -> Jsonb,
        /// Board column.
        #[max_length = 50]
        status -> Varchar,
        /// Urgency.
        #[max_length = 50]
        priority -> Varchar,
        /// Optional assignee.
        assignee_id -> Nullable<Uuid>,
        /// Position within the status column.
        position -> Int8,
        /// Archival timestamp; null while the task is on the active board.
        archived_at -> Nullable<Timestamptz>,
        /// Authoring member.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
