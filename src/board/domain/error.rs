//! Error types for board domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A checklist mutation referenced an item index past the end.
    #[error("checklist index {index} out of bounds (length {len})")]
    ChecklistIndexOutOfBounds {
        /// Requested item index.
        index: usize,
        /// Current checklist length.
        len: usize,
    },

    /// Archival was requested for a task outside the `done` column.
    #[error("task {task_id} cannot be archived from status '{status}'")]
    ArchiveRequiresDone {
        /// Task that was targeted.
        task_id: TaskId,
        /// Status the task held at the time.
        status: TaskStatus,
    },

    /// Restore was requested for a task that is not archived.
    #[error("task {0} is not archived")]
    NotArchived(TaskId),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
