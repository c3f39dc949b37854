//! Store port for task persistence and listing.

use crate::board::domain::{Checklist, Task, TaskId, TaskPriority, TaskStatus, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Whether a listing targets the active board or the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveScope {
    /// Tasks with no archival timestamp, ordered by `(position, created_at,
    /// id)` ascending.
    Active,
    /// Archived tasks, ordered by `archived_at` descending.
    Archived,
}

/// Listing filter for [`TaskStore::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    scope: ArchiveScope,
}

impl TaskFilter {
    /// All active tasks across every column.
    #[must_use]
    pub const fn active() -> Self {
        Self {
            status: None,
            scope: ArchiveScope::Active,
        }
    }

    /// Active tasks in one column.
    #[must_use]
    pub const fn active_in(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            scope: ArchiveScope::Active,
        }
    }

    /// All archived tasks.
    #[must_use]
    pub const fn archived() -> Self {
        Self {
            status: None,
            scope: ArchiveScope::Archived,
        }
    }

    /// Returns the column restriction, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the archive scope.
    #[must_use]
    pub const fn scope(&self) -> ArchiveScope {
        self.scope
    }
}

/// Partial update for a stored task.
///
/// Outer `None` leaves a column untouched; for nullable columns the inner
/// option distinguishes "set" from "clear". The service stamps `updated_at`
/// from its clock on every patch it issues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// Replacement urgency.
    pub priority: Option<TaskPriority>,
    /// Replacement assignee (`Some(None)` clears it).
    pub assignee_id: Option<Option<UserId>>,
    /// Replacement checklist.
    pub checklist: Option<Checklist>,
    /// Replacement board column.
    pub status: Option<TaskStatus>,
    /// Replacement position within the column.
    pub position: Option<i64>,
    /// Replacement archival timestamp (`Some(None)` restores).
    pub archived_at: Option<Option<DateTime<Utc>>>,
    /// Mutation timestamp for the row.
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.assignee_id.is_none()
            && self.checklist.is_none()
            && self.status.is_none()
            && self.position.is_none()
            && self.archived_at.is_none()
    }
}

/// Columns the deployed schema is known to carry.
///
/// This replaces the failed-query probing the original deployment relied on
/// during migration rollout: adapters report their schema capabilities up
/// front and callers degrade explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCapabilities {
    /// The `tasks.archived_at` column is present.
    pub archiving: bool,
}

impl StoreCapabilities {
    /// Capabilities of a fully migrated schema.
    #[must_use]
    pub const fn current() -> Self {
        Self { archiving: true }
    }
}

impl Default for StoreCapabilities {
    fn default() -> Self {
        Self::current()
    }
}

/// Task persistence contract.
///
/// Each call is independently atomic at the row level; no multi-row
/// transactional guarantee is assumed.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Validation`] when the row violates a
    /// storage constraint, or [`TaskStoreError::Transient`] on service
    /// failure.
    async fn insert(&self, task: &Task) -> TaskStoreResult<TaskId>;

    /// Lists tasks matching the filter, in the filter's documented order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::SchemaMismatch`] when the archive scope is
    /// requested against a schema without `archived_at`.
    async fn list(&self, filter: TaskFilter) -> TaskStoreResult<Vec<Task>>;

    /// Finds a task by identifier, returning `None` when absent.
    async fn find(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Applies a partial update to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the id is absent.
    async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()>;

    /// Stamps `archived_at = now` on every unarchived `done` task.
    ///
    /// A sweep with no eligible rows is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::SchemaMismatch`] when the schema lacks the
    /// `archived_at` column.
    async fn bulk_archive(&self, now: DateTime<Utc>) -> TaskStoreResult<()>;

    /// Hard-deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the id is absent.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Reports which optional columns the deployed schema carries.
    fn capabilities(&self) -> StoreCapabilities;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// No authenticated actor was present for a mutating call.
    #[error("unauthorized: no authenticated actor")]
    Unauthorized,

    /// A required field was missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The targeted task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A referenced column is not present in the deployed schema.
    ///
    /// Soft, expected transitional condition during rollout; callers
    /// degrade rather than fail.
    #[error("schema mismatch: column '{column}' not deployed")]
    SchemaMismatch {
        /// Missing column name.
        column: &'static str,
    },

    /// Network or service failure.
    #[error("transient store error: {0}")]
    Transient(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a transient persistence error.
    pub fn transient(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transient(Arc::new(err))
    }
}
