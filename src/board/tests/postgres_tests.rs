//! Row-mapping tests for the Diesel task adapter.
//!
//! The SQL paths need a live database; these cover the conversions on
//! either side of them, including the reduced rows used against schemas
//! predating `archived_at`.

use eyre::ensure;
use rstest::rstest;
use serde_json::json;

use super::fixtures::{archived_task, base_time, persisted_task};
use crate::board::adapters::postgres::models::{LegacyNewTaskRow, LegacyTaskRow, TaskRow};
use crate::board::adapters::postgres::{row_to_task, to_new_row};
use crate::board::domain::TaskStatus;

#[rstest]
fn insert_row_carries_the_archival_timestamp() -> eyre::Result<()> {
    let task = archived_task("Wrap party", 2, base_time());

    let row = to_new_row(&task)?;

    ensure!(row.id == task.id().into_inner());
    ensure!(row.title == "Wrap party");
    ensure!(row.status == "done");
    ensure!(row.position == 2);
    ensure!(row.archived_at == Some(base_time()));
    Ok(())
}

#[rstest]
fn legacy_insert_row_drops_only_the_archival_column() -> eyre::Result<()> {
    let task = persisted_task("Cold open", TaskStatus::Todo, 1);
    let row = to_new_row(&task)?;

    let legacy = LegacyNewTaskRow::from(row.clone());

    ensure!(legacy.id == row.id);
    ensure!(legacy.title == row.title);
    ensure!(legacy.description == row.description);
    ensure!(legacy.checklist == row.checklist);
    ensure!(legacy.status == row.status);
    ensure!(legacy.priority == row.priority);
    ensure!(legacy.assignee_id == row.assignee_id);
    ensure!(legacy.position == row.position);
    ensure!(legacy.created_by == row.created_by);
    ensure!(legacy.created_at == row.created_at);
    ensure!(legacy.updated_at == row.updated_at);
    Ok(())
}

#[rstest]
fn legacy_query_row_hydrates_as_active() -> eyre::Result<()> {
    let legacy = LegacyTaskRow {
        id: uuid::Uuid::new_v4(),
        title: "Pre-migration row".to_owned(),
        description: None,
        checklist: json!([]),
        status: "in_progress".to_owned(),
        priority: "high".to_owned(),
        assignee_id: None,
        position: 4,
        created_by: uuid::Uuid::new_v4(),
        created_at: base_time(),
        updated_at: base_time(),
    };

    let task = row_to_task(TaskRow::from(legacy))?;

    ensure!(!task.is_archived());
    ensure!(task.status() == TaskStatus::InProgress);
    ensure!(task.position() == 4);
    ensure!(task.checklist().is_empty());
    Ok(())
}
