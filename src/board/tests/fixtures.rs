//! Shared fixtures for board tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::board::{
    adapters::memory::InMemoryTaskStore,
    domain::{
        Checklist, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, UserId,
    },
    ports::{TaskStore, TaskStoreResult},
};

/// Fixed reference instant so ordering assertions are deterministic.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Builds an active task as it would come back from persistence.
pub fn persisted_task(title: &str, status: TaskStatus, position: i64) -> Task {
    persisted_task_created_at(title, status, position, base_time())
}

/// Builds an active task with an explicit creation instant.
pub fn persisted_task_created_at(
    title: &str,
    status: TaskStatus,
    position: i64,
    created_at: DateTime<Utc>,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: title.to_owned(),
        description: None,
        checklist: Checklist::new(),
        status,
        priority: TaskPriority::Medium,
        position,
        assignee_id: None,
        archived_at: None,
        created_by: UserId::new(),
        created_at,
        updated_at: created_at,
    })
}

/// Builds an archived `done` task with an explicit archival instant.
pub fn archived_task(title: &str, position: i64, archived_at: DateTime<Utc>) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: title.to_owned(),
        description: None,
        checklist: Checklist::new(),
        status: TaskStatus::Done,
        priority: TaskPriority::Medium,
        position,
        assignee_id: None,
        archived_at: Some(archived_at),
        created_by: UserId::new(),
        created_at: base_time(),
        updated_at: archived_at,
    })
}

/// Inserts the given tasks into a store.
pub async fn seed(store: &InMemoryTaskStore, tasks: &[Task]) -> TaskStoreResult<()> {
    for task in tasks {
        store.insert(task).await?;
    }
    Ok(())
}
