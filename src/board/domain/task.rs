//! Task aggregate root and related board column types.

use super::{
    BoardDomainError, Checklist, ParseTaskPriorityError, ParseTaskStatusError, TaskId, UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Board column a task belongs to.
///
/// The status partitions the ordering space: `position` values are only
/// comparable between tasks sharing a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    Todo,
    /// Work is underway.
    InProgress,
    /// Work is complete.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relative urgency of a task. Carries no ordering invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low urgency.
    Low,
    /// Default urgency.
    #[default]
    Medium,
    /// High urgency.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Validated inputs for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Task title; must be non-empty after trimming.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Urgency, defaulting to [`TaskPriority::Medium`].
    pub priority: TaskPriority,
    /// Optional member the task is assigned to.
    pub assignee_id: Option<UserId>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    checklist: Checklist,
    status: TaskStatus,
    priority: TaskPriority,
    position: i64,
    assignee_id: Option<UserId>,
    archived_at: Option<DateTime<Utc>>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted checklist items.
    pub checklist: Checklist,
    /// Persisted board column.
    pub status: TaskStatus,
    /// Persisted urgency.
    pub priority: TaskPriority,
    /// Persisted position within the status column.
    pub position: i64,
    /// Persisted assignee, if any.
    pub assignee_id: Option<UserId>,
    /// Persisted archival timestamp, if any.
    pub archived_at: Option<DateTime<Utc>>,
    /// Persisted authoring member.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task at the end of the `todo` column.
    ///
    /// The status is always `todo` at creation; `position` is computed by
    /// the caller over the current `todo` column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn create(
        data: NewTaskData,
        position: i64,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let title = validate_title(data.title)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title,
            description: data.description,
            checklist: Checklist::new(),
            status: TaskStatus::Todo,
            priority: data.priority,
            position,
            assignee_id: data.assignee_id,
            archived_at: None,
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            checklist: data.checklist,
            status: data.status,
            priority: data.priority,
            position: data.position,
            assignee_id: data.assignee_id,
            archived_at: data.archived_at,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the checklist.
    #[must_use]
    pub const fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Returns the board column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the urgency.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the position within the status column.
    #[must_use]
    pub const fn position(&self) -> i64 {
        self.position
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the archival timestamp, if any.
    #[must_use]
    pub const fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    /// Returns `true` when the task is excluded from the active board.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Returns the authoring member.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), BoardDomainError> {
        self.title = validate_title(title.into())?;
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Replaces the urgency.
    pub const fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Replaces the assignee.
    pub const fn set_assignee(&mut self, assignee_id: Option<UserId>) {
        self.assignee_id = assignee_id;
    }

    /// Replaces the checklist wholesale.
    pub fn set_checklist(&mut self, checklist: Checklist) {
        self.checklist = checklist;
    }

    /// Moves the task to a status column at the given position.
    ///
    /// Cross-column moves always append; the caller computes `position`
    /// over the destination column via [`super::next_position`].
    pub const fn move_to(&mut self, status: TaskStatus, position: i64) {
        self.status = status;
        self.position = position;
    }

    /// Soft-removes the task from the active board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ArchiveRequiresDone`] unless the task is
    /// in the `done` column.
    pub fn archive_at(&mut self, at: DateTime<Utc>) -> Result<(), BoardDomainError> {
        if self.status != TaskStatus::Done {
            return Err(BoardDomainError::ArchiveRequiresDone {
                task_id: self.id,
                status: self.status,
            });
        }
        self.archived_at = Some(at);
        Ok(())
    }

    /// Returns the task to the active board, forcing the `done` column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotArchived`] when the task is active.
    pub fn restore(&mut self) -> Result<(), BoardDomainError> {
        if self.archived_at.is_none() {
            return Err(BoardDomainError::NotArchived(self.id));
        }
        self.archived_at = None;
        self.status = TaskStatus::Done;
        Ok(())
    }

    /// Records a mutation timestamp supplied by the caller.
    pub const fn touch_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

/// Trims and validates a task title.
fn validate_title(title: String) -> Result<String, BoardDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
