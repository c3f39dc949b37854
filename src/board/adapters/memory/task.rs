//! Thread-safe in-memory task store for tests and embedding.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Task, TaskId, TaskStatus},
    ports::{
        ArchiveScope, StoreCapabilities, TaskFilter, TaskPatch, TaskStore, TaskStoreError,
        TaskStoreResult,
    },
};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
    capabilities: StoreCapabilities,
}

impl InMemoryTaskStore {
    /// Creates an empty store with a fully migrated schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store simulating a schema without `archived_at`.
    ///
    /// Used to exercise the degraded pre-migration paths.
    #[must_use]
    pub fn without_archiving() -> Self {
        Self {
            state: Arc::default(),
            capabilities: StoreCapabilities { archiving: false },
        }
    }
}

fn lock_error(err: impl ToString) -> TaskStoreError {
    TaskStoreError::transient(std::io::Error::other(err.to_string()))
}

/// Applies a patch to a stored task, enforcing domain invariants.
///
/// Column order matters for archival: a restore patch carries both a status
/// and a cleared `archived_at`, and the status lands first.
fn apply_patch(task: &mut Task, patch: TaskPatch) -> TaskStoreResult<()> {
    if let Some(title) = patch.title {
        task.set_title(title)
            .map_err(|err| TaskStoreError::Validation(err.to_string()))?;
    }
    if let Some(description) = patch.description {
        task.set_description(description);
    }
    if let Some(priority) = patch.priority {
        task.set_priority(priority);
    }
    if let Some(assignee_id) = patch.assignee_id {
        task.set_assignee(assignee_id);
    }
    if let Some(checklist) = patch.checklist {
        task.set_checklist(checklist);
    }
    match (patch.status, patch.position) {
        (Some(status), Some(position)) => task.move_to(status, position),
        (Some(status), None) => task.move_to(status, task.position()),
        (None, Some(position)) => task.move_to(task.status(), position),
        (None, None) => {}
    }
    match patch.archived_at {
        Some(Some(at)) => task
            .archive_at(at)
            .map_err(|err| TaskStoreError::Validation(err.to_string()))?,
        Some(None) => task
            .restore()
            .map_err(|err| TaskStoreError::Validation(err.to_string()))?,
        None => {}
    }
    if let Some(at) = patch.updated_at {
        task.touch_at(at);
    }
    Ok(())
}

fn matches_status(task: &Task, status: Option<TaskStatus>) -> bool {
    status.is_none_or(|wanted| task.status() == wanted)
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<TaskId> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&task.id()) {
            return Err(TaskStoreError::Validation(format!(
                "duplicate task id: {}",
                task.id()
            )));
        }
        state.insert(task.id(), task.clone());
        Ok(task.id())
    }

    async fn list(&self, filter: TaskFilter) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tasks: Vec<Task> = match filter.scope() {
            ArchiveScope::Active => state
                .values()
                .filter(|task| !task.is_archived() && matches_status(task, filter.status()))
                .cloned()
                .collect(),
            ArchiveScope::Archived => {
                if !self.capabilities.archiving {
                    return Err(TaskStoreError::SchemaMismatch {
                        column: "archived_at",
                    });
                }
                state
                    .values()
                    .filter(|task| task.is_archived() && matches_status(task, filter.status()))
                    .cloned()
                    .collect()
            }
        };
        match filter.scope() {
            ArchiveScope::Active => tasks.sort_by(|a, b| {
                a.position()
                    .cmp(&b.position())
                    .then_with(|| a.created_at().cmp(&b.created_at()))
                    .then_with(|| a.id().cmp(&b.id()))
            }),
            ArchiveScope::Archived => tasks.sort_by(|a, b| {
                b.archived_at()
                    .cmp(&a.archived_at())
                    .then_with(|| a.id().cmp(&b.id()))
            }),
        }
        Ok(tasks)
    }

    async fn find(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&id).cloned())
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()> {
        if patch.archived_at.is_some() && !self.capabilities.archiving {
            return Err(TaskStoreError::SchemaMismatch {
                column: "archived_at",
            });
        }
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state.get_mut(&id).ok_or(TaskStoreError::NotFound(id))?;
        apply_patch(task, patch)
    }

    async fn bulk_archive(&self, now: DateTime<Utc>) -> TaskStoreResult<()> {
        if !self.capabilities.archiving {
            return Err(TaskStoreError::SchemaMismatch {
                column: "archived_at",
            });
        }
        let mut state = self.state.write().map_err(lock_error)?;
        for task in state.values_mut() {
            if task.status() == TaskStatus::Done && !task.is_archived() {
                task.archive_at(now)
                    .map_err(|err| TaskStoreError::Validation(err.to_string()))?;
                task.touch_at(now);
            }
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskStoreError::NotFound(id))
    }

    fn capabilities(&self) -> StoreCapabilities {
        self.capabilities
    }
}
