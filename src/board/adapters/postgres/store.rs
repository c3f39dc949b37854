//! `PostgreSQL` task store backed by Diesel.

use super::{
    models::{LegacyNewTaskRow, LegacyTaskRow, NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::board::{
    domain::{
        Checklist, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, UserId,
    },
    ports::{
        ArchiveScope, StoreCapabilities, TaskFilter, TaskPatch, TaskStore, TaskStoreError,
        TaskStoreResult,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: BoardPgPool,
    capabilities: StoreCapabilities,
}

#[derive(QueryableByName)]
struct ColumnPresence {
    #[diesel(sql_type = diesel::sql_types::Bool)]
    present: bool,
}

impl PostgresTaskStore {
    /// Creates a store assuming a fully migrated schema.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self {
            pool,
            capabilities: StoreCapabilities::current(),
        }
    }

    /// Creates a store after probing the deployed schema.
    ///
    /// The probe runs once at construction; the result is cached in
    /// [`StoreCapabilities`] and consulted by archival paths. This replaces
    /// the failed-query fallback the original deployment used during
    /// migration rollout.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transient`] when the probe query fails.
    pub async fn detect(pool: BoardPgPool) -> TaskStoreResult<Self> {
        let probe_pool = pool.clone();
        let archiving = run_on_pool(probe_pool, |connection| {
            let row: ColumnPresence = diesel::sql_query(concat!(
                "SELECT EXISTS (SELECT 1 FROM information_schema.columns ",
                "WHERE table_name = 'tasks' AND column_name = 'archived_at') AS present",
            ))
            .get_result(connection)
            .map_err(TaskStoreError::transient)?;
            Ok(row.present)
        })
        .await?;

        Ok(Self {
            pool,
            capabilities: StoreCapabilities { archiving },
        })
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_on_pool(self.pool.clone(), f).await
    }
}

async fn run_on_pool<F, T>(pool: BoardPgPool, f: F) -> TaskStoreResult<T>
where
    F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(TaskStoreError::transient)?;
        f(&mut connection)
    })
    .await
    .map_err(TaskStoreError::transient)?
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<TaskId> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;
        let archiving = self.capabilities.archiving;

        self.run_blocking(move |connection| {
            let inserted = if archiving {
                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .execute(connection)
            } else {
                // Pre-migration schema: the insert must not name the
                // archival column.
                diesel::insert_into(tasks::table)
                    .values(&LegacyNewTaskRow::from(new_row))
                    .execute(connection)
            };
            inserted.map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    TaskStoreError::Validation(format!("duplicate task id: {task_id}"))
                }
                _ => TaskStoreError::transient(err),
            })?;
            Ok(task_id)
        })
        .await
    }

    async fn list(&self, filter: TaskFilter) -> TaskStoreResult<Vec<Task>> {
        let capabilities = self.capabilities;
        self.run_blocking(move |connection| {
            let rows = load_rows(connection, filter, capabilities)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let capabilities = self.capabilities;
        self.run_blocking(move |connection| {
            let row = if capabilities.archiving {
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .select(TaskRow::as_select())
                    .first::<TaskRow>(connection)
                    .optional()
                    .map_err(TaskStoreError::transient)?
            } else {
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .select((
                        tasks::id,
                        tasks::title,
                        tasks::description,
                        tasks::checklist,
                        tasks::status,
                        tasks::priority,
                        tasks::assignee_id,
                        tasks::position,
                        tasks::created_by,
                        tasks::created_at,
                        tasks::updated_at,
                    ))
                    .first::<LegacyTaskRow>(connection)
                    .optional()
                    .map_err(TaskStoreError::transient)?
                    .map(TaskRow::from)
            };
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()> {
        if patch.archived_at.is_some() && !self.capabilities.archiving {
            return Err(TaskStoreError::SchemaMismatch {
                column: "archived_at",
            });
        }
        if patch.is_empty() && patch.updated_at.is_none() {
            return Ok(());
        }
        let changeset = to_changeset(patch)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskStoreError::transient)?;
            if affected == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn bulk_archive(&self, now: DateTime<Utc>) -> TaskStoreResult<()> {
        if !self.capabilities.archiving {
            return Err(TaskStoreError::SchemaMismatch {
                column: "archived_at",
            });
        }
        self.run_blocking(move |connection| {
            diesel::update(
                tasks::table
                    .filter(tasks::status.eq(TaskStatus::Done.as_str()))
                    .filter(tasks::archived_at.is_null()),
            )
            .set((tasks::archived_at.eq(now), tasks::updated_at.eq(now)))
            .execute(connection)
            .map_err(TaskStoreError::transient)?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskStoreError::transient)?;
            if affected == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    fn capabilities(&self) -> StoreCapabilities {
        self.capabilities
    }
}

fn load_rows(
    connection: &mut PgConnection,
    filter: TaskFilter,
    capabilities: StoreCapabilities,
) -> TaskStoreResult<Vec<TaskRow>> {
    match (filter.scope(), capabilities.archiving) {
        (ArchiveScope::Active, true) => {
            let mut query = tasks::table
                .filter(tasks::archived_at.is_null())
                .into_boxed();
            if let Some(status) = filter.status() {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            query
                .order((
                    tasks::position.asc(),
                    tasks::created_at.asc(),
                    tasks::id.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::transient)
        }
        (ArchiveScope::Active, false) => {
            // Pre-migration schema: nothing is archived, so every row is
            // active; select the reduced projection.
            let mut query = tasks::table.into_boxed();
            if let Some(status) = filter.status() {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            let rows = query
                .order((
                    tasks::position.asc(),
                    tasks::created_at.asc(),
                    tasks::id.asc(),
                ))
                .select((
                    tasks::id,
                    tasks::title,
                    tasks::description,
                    tasks::checklist,
                    tasks::status,
                    tasks::priority,
                    tasks::assignee_id,
                    tasks::position,
                    tasks::created_by,
                    tasks::created_at,
                    tasks::updated_at,
                ))
                .load::<LegacyTaskRow>(connection)
                .map_err(TaskStoreError::transient)?;
            Ok(rows.into_iter().map(TaskRow::from).collect())
        }
        (ArchiveScope::Archived, true) => {
            let mut query = tasks::table
                .filter(tasks::archived_at.is_not_null())
                .into_boxed();
            if let Some(status) = filter.status() {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            query
                .order((tasks::archived_at.desc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::transient)
        }
        (ArchiveScope::Archived, false) => Err(TaskStoreError::SchemaMismatch {
            column: "archived_at",
        }),
    }
}

pub(crate) fn to_new_row(task: &Task) -> TaskStoreResult<NewTaskRow> {
    let checklist = serde_json::to_value(task.checklist()).map_err(TaskStoreError::transient)?;
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        checklist,
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assignee_id: task.assignee_id().map(UserId::into_inner),
        position: task.position(),
        archived_at: task.archived_at(),
        created_by: task.created_by().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changeset(patch: TaskPatch) -> TaskStoreResult<TaskChangeset> {
    let checklist = patch
        .checklist
        .map(|list| serde_json::to_value(&list).map_err(TaskStoreError::transient))
        .transpose()?;
    Ok(TaskChangeset {
        title: patch.title,
        description: patch.description,
        checklist,
        status: patch.status.map(|status| status.as_str().to_owned()),
        priority: patch.priority.map(|priority| priority.as_str().to_owned()),
        assignee_id: patch
            .assignee_id
            .map(|assignee| assignee.map(UserId::into_inner)),
        position: patch.position,
        archived_at: patch.archived_at,
        updated_at: patch.updated_at,
    })
}

pub(crate) fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        checklist: persisted_checklist,
        status: persisted_status,
        priority: persisted_priority,
        assignee_id,
        position,
        archived_at,
        created_by,
        created_at,
        updated_at,
    } = row;

    let checklist = serde_json::from_value::<Checklist>(persisted_checklist)
        .map_err(TaskStoreError::transient)?;
    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskStoreError::transient)?;
    let priority =
        TaskPriority::try_from(persisted_priority.as_str()).map_err(TaskStoreError::transient)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        checklist,
        status,
        priority,
        position,
        assignee_id: assignee_id.map(UserId::from_uuid),
        archived_at,
        created_by: UserId::from_uuid(created_by),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
