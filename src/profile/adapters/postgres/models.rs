//! Diesel row models for profile persistence.

use super::schema::profiles;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for profile records on a fully migrated schema.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    /// Member identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub display_name: String,
    /// Optional avatar URL.
    pub avatar_url: Option<String>,
    /// Explicitly chosen colour, if any.
    pub user_color: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Reduced projection used against schemas predating `user_color`.
#[derive(Debug, Clone, Queryable)]
pub struct LegacyProfileRow {
    /// Member identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub display_name: String,
    /// Optional avatar URL.
    pub avatar_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<LegacyProfileRow> for ProfileRow {
    fn from(row: LegacyProfileRow) -> Self {
        Self {
            id: row.id,
            display_name: row.display_name,
            avatar_url: row.avatar_url,
            user_color: None,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Partial-update model for profile records.
///
/// Outer `None` skips a column; `Some(None)` writes SQL NULL.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = profiles)]
pub struct ProfileChangeset {
    /// Replacement display name.
    pub display_name: Option<String>,
    /// Replacement avatar URL.
    pub avatar_url: Option<Option<String>>,
    /// Replacement colour.
    pub user_color: Option<Option<String>>,
    /// Mutation timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}
