//! Service layer for board listing, task CRUD, and archival.

use crate::auth::AuthContext;
use crate::board::{
    domain::{
        BoardDomainError, Checklist, NewTaskData, Task, TaskId, TaskPriority, TaskStatus, UserId,
        next_position,
    },
    ports::{TaskFilter, TaskPatch, TaskStore, TaskStoreError},
};
use crate::profile::domain::Profile;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
///
/// Status is never an input: new tasks always enter at the end of `todo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    assignee_id: Option<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
            assignee_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the urgency.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }
}

/// Partial edit of a task's descriptive fields.
///
/// Edits never touch `status` or `position`; column membership changes go
/// through [`BoardService::update_task_status`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskEdit {
    title: Option<String>,
    description: Option<Option<String>>,
    priority: Option<TaskPriority>,
    assignee_id: Option<Option<UserId>>,
    checklist: Option<Checklist>,
}

impl TaskEdit {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the urgency.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(Some(assignee_id));
        self
    }

    /// Clears the assignee.
    #[must_use]
    pub const fn clear_assignee(mut self) -> Self {
        self.assignee_id = Some(None);
        self
    }

    /// Replaces the checklist.
    #[must_use]
    pub fn with_checklist(mut self, checklist: Checklist) -> Self {
        self.checklist = Some(checklist);
        self
    }

    /// Returns `true` when the edit changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.assignee_id.is_none()
            && self.checklist.is_none()
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// No authenticated actor was present for a mutating call.
    #[error("unauthorized: no authenticated actor")]
    Unauthorized,

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Board orchestration service.
#[derive(Clone)]
pub struct BoardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> BoardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Lists the active board, every column, ordered by `(position,
    /// created_at, id)` ascending.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the listing fails.
    pub async fn list_active_tasks(&self) -> BoardServiceResult<Vec<Task>> {
        Ok(self.store.list(TaskFilter::active()).await?)
    }

    /// Lists archived tasks, most recently archived first.
    ///
    /// Degrades to an empty list when the deployed schema predates the
    /// `archived_at` column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the listing fails.
    pub async fn list_archived_tasks(&self) -> BoardServiceResult<Vec<Task>> {
        if !self.store.capabilities().archiving {
            tracing::warn!("archived listing degraded to empty: archived_at column not deployed");
            return Ok(Vec::new());
        }
        Ok(self.store.list(TaskFilter::archived()).await?)
    }

    /// Creates a task at the end of the `todo` column.
    ///
    /// The position is computed over the store's current `todo` column, not
    /// a client snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Unauthorized`] without an actor,
    /// [`BoardServiceError::Domain`] for a blank title, or
    /// [`BoardServiceError::Store`] when persistence fails.
    pub async fn create_task(
        &self,
        auth: &AuthContext,
        request: CreateTaskRequest,
    ) -> BoardServiceResult<Task> {
        let actor = require_actor(auth)?;
        let todo_column = self
            .store
            .list(TaskFilter::active_in(TaskStatus::Todo))
            .await?;
        let position = next_position(todo_column.iter().map(Task::position));

        let data = NewTaskData {
            title: request.title,
            description: request.description,
            priority: request.priority,
            assignee_id: request.assignee_id,
        };
        let task = Task::create(data, position, actor, &*self.clock)?;
        self.store.insert(&task).await?;
        Ok(task)
    }

    /// Applies a descriptive edit to a task.
    ///
    /// An empty edit issues no store call.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Unauthorized`] without an actor,
    /// [`BoardServiceError::Domain`] for a blank title, or
    /// [`BoardServiceError::Store`] when the task is missing or persistence
    /// fails.
    pub async fn update_task(
        &self,
        auth: &AuthContext,
        id: TaskId,
        edit: TaskEdit,
    ) -> BoardServiceResult<()> {
        require_actor(auth)?;
        if edit.is_empty() {
            return Ok(());
        }
        if let Some(title) = &edit.title
            && title.trim().is_empty()
        {
            return Err(BoardDomainError::EmptyTitle.into());
        }
        let patch = TaskPatch {
            title: edit.title,
            description: edit.description,
            priority: edit.priority,
            assignee_id: edit.assignee_id,
            checklist: edit.checklist,
            updated_at: Some(self.clock.utc()),
            ..TaskPatch::default()
        };
        Ok(self.store.update(id, patch).await?)
    }

    /// Moves a task to a status column at a caller-supplied position.
    ///
    /// The drag-move reconciler precomputes the position from its cached
    /// column snapshot; see
    /// [`DragMoveReconciler`](crate::board::services::DragMoveReconciler).
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Unauthorized`] without an actor, or
    /// [`BoardServiceError::Store`] when the task is missing or persistence
    /// fails.
    pub async fn update_task_status(
        &self,
        auth: &AuthContext,
        id: TaskId,
        status: TaskStatus,
        position: i64,
    ) -> BoardServiceResult<()> {
        require_actor(auth)?;
        let patch = TaskPatch {
            status: Some(status),
            position: Some(position),
            updated_at: Some(self.clock.utc()),
            ..TaskPatch::default()
        };
        Ok(self.store.update(id, patch).await?)
    }

    /// Replaces a task's checklist wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Unauthorized`] without an actor, or
    /// [`BoardServiceError::Store`] when the task is missing or persistence
    /// fails.
    pub async fn update_task_checklist(
        &self,
        auth: &AuthContext,
        id: TaskId,
        checklist: Checklist,
    ) -> BoardServiceResult<()> {
        require_actor(auth)?;
        let patch = TaskPatch {
            checklist: Some(checklist),
            updated_at: Some(self.clock.utc()),
            ..TaskPatch::default()
        };
        Ok(self.store.update(id, patch).await?)
    }

    /// Hard-deletes a task. No tombstone is kept.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Unauthorized`] without an actor, or
    /// [`BoardServiceError::Store`] when the task is missing or persistence
    /// fails.
    pub async fn delete_task(&self, auth: &AuthContext, id: TaskId) -> BoardServiceResult<()> {
        require_actor(auth)?;
        Ok(self.store.delete(id).await?)
    }

    /// Sweeps every unarchived `done` task into the archive.
    ///
    /// Idempotent: a sweep with nothing eligible is a no-op. When the
    /// deployed schema predates `archived_at` the sweep degrades to a
    /// logged no-op rather than raising.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Unauthorized`] without an actor, or
    /// [`BoardServiceError::Store`] when persistence fails.
    pub async fn archive_completed_tasks(&self, auth: &AuthContext) -> BoardServiceResult<()> {
        require_actor(auth)?;
        if !self.store.capabilities().archiving {
            tracing::warn!("archive sweep skipped: archived_at column not deployed");
            return Ok(());
        }
        Ok(self.store.bulk_archive(self.clock.utc()).await?)
    }

    /// Restores an archived task to the active board.
    ///
    /// The task returns under `done` unconditionally, whatever status it
    /// held before archival.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Unauthorized`] without an actor,
    /// [`TaskStoreError::NotFound`] for an absent id,
    /// [`BoardDomainError::NotArchived`] for an active task, or
    /// [`BoardServiceError::Store`] when persistence fails.
    pub async fn restore_task(&self, auth: &AuthContext, id: TaskId) -> BoardServiceResult<()> {
        require_actor(auth)?;
        let task = self
            .store
            .find(id)
            .await?
            .ok_or(TaskStoreError::NotFound(id))?;
        if !task.is_archived() {
            return Err(BoardDomainError::NotArchived(id).into());
        }
        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            archived_at: Some(None),
            updated_at: Some(self.clock.utc()),
            ..TaskPatch::default()
        };
        Ok(self.store.update(id, patch).await?)
    }
}

fn require_actor(auth: &AuthContext) -> BoardServiceResult<UserId> {
    auth.current_user().ok_or(BoardServiceError::Unauthorized)
}

/// A task decorated with its author's profile for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskWithAuthor {
    /// The task itself.
    pub task: Task,
    /// The authoring member's profile, when known.
    pub author: Option<Profile>,
}

/// Decorates tasks with author profiles, preserving order.
///
/// Authors absent from the directory (for example, deleted accounts) are
/// left as `None`.
#[must_use]
pub fn with_authors(
    tasks: Vec<Task>,
    directory: &HashMap<UserId, Profile>,
) -> Vec<TaskWithAuthor> {
    tasks
        .into_iter()
        .map(|task| {
            let author = directory.get(&task.created_by()).cloned();
            TaskWithAuthor { task, author }
        })
        .collect()
}
