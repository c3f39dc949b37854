//! Diesel row models for board persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records on a fully migrated schema.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Checklist JSON payload.
    pub checklist: Value,
    /// Board column.
    pub status: String,
    /// Urgency.
    pub priority: String,
    /// Optional assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Position within the status column.
    pub position: i64,
    /// Archival timestamp, if any.
    pub archived_at: Option<DateTime<Utc>>,
    /// Authoring member.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Reduced projection used against schemas predating `archived_at`.
#[derive(Debug, Clone, Queryable)]
pub struct LegacyTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Checklist JSON payload.
    pub checklist: Value,
    /// Board column.
    pub status: String,
    /// Urgency.
    pub priority: String,
    /// Optional assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Position within the status column.
    pub position: i64,
    /// Authoring member.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<LegacyTaskRow> for TaskRow {
    fn from(row: LegacyTaskRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            checklist: row.checklist,
            status: row.status,
            priority: row.priority,
            assignee_id: row.assignee_id,
            position: row.position,
            archived_at: None,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Checklist JSON payload.
    pub checklist: Value,
    /// Board column.
    pub status: String,
    /// Urgency.
    pub priority: String,
    /// Optional assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Position within the status column.
    pub position: i64,
    /// Archival timestamp, if any.
    pub archived_at: Option<DateTime<Utc>>,
    /// Authoring member.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model used against schemas predating `archived_at`.
///
/// Naming the column in the insert would fail on such a schema; new tasks
/// are never archived, so dropping it loses nothing.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct LegacyNewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Checklist JSON payload.
    pub checklist: Value,
    /// Board column.
    pub status: String,
    /// Urgency.
    pub priority: String,
    /// Optional assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Position within the status column.
    pub position: i64,
    /// Authoring member.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<NewTaskRow> for LegacyNewTaskRow {
    fn from(row: NewTaskRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            checklist: row.checklist,
            status: row.status,
            priority: row.priority,
            assignee_id: row.assignee_id,
            position: row.position,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Partial-update model for task records.
///
/// Outer `None` skips a column; `Some(None)` writes SQL NULL.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<Option<String>>,
    /// Replacement checklist payload.
    pub checklist: Option<Value>,
    /// Replacement board column.
    pub status: Option<String>,
    /// Replacement urgency.
    pub priority: Option<String>,
    /// Replacement assignee.
    pub assignee_id: Option<Option<uuid::Uuid>>,
    /// Replacement position.
    pub position: Option<i64>,
    /// Replacement archival timestamp.
    pub archived_at: Option<Option<DateTime<Utc>>>,
    /// Mutation timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}
