//! Unit tests for task aggregate invariants.

use chrono::Duration;
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

use super::fixtures::{base_time, persisted_task};
use crate::board::domain::{
    BoardDomainError, Checklist, ChecklistItem, NewTaskData, Task, TaskPriority, TaskStatus,
    UserId,
};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn new_task_data(title: &str) -> NewTaskData {
    NewTaskData {
        title: title.to_owned(),
        description: None,
        priority: TaskPriority::default(),
        assignee_id: None,
    }
}

#[rstest]
fn create_forces_todo_status(clock: DefaultClock) -> eyre::Result<()> {
    let task = Task::create(new_task_data("Edit intro sequence"), 4, UserId::new(), &clock)?;

    ensure!(task.status() == TaskStatus::Todo);
    ensure!(task.position() == 4);
    ensure!(task.priority() == TaskPriority::Medium);
    ensure!(task.checklist().is_empty());
    ensure!(!task.is_archived());
    Ok(())
}

#[rstest]
fn create_trims_title(clock: DefaultClock) -> eyre::Result<()> {
    let task = Task::create(new_task_data("  Colour grade  "), 0, UserId::new(), &clock)?;
    ensure!(task.title() == "Colour grade");
    Ok(())
}

#[rstest]
#[case("")]
#[case("   ")]
fn create_rejects_blank_title(#[case] title: &str, clock: DefaultClock) {
    let result = Task::create(new_task_data(title), 0, UserId::new(), &clock);
    assert_eq!(result, Err(BoardDomainError::EmptyTitle));
}

#[rstest]
fn set_title_rejects_blank_without_mutation() -> eyre::Result<()> {
    let mut task = persisted_task("Storyboard review", TaskStatus::Todo, 0);

    let result = task.set_title("  ");

    ensure!(result == Err(BoardDomainError::EmptyTitle));
    ensure!(task.title() == "Storyboard review");
    Ok(())
}

#[rstest]
fn move_to_changes_column_and_position() {
    let mut task = persisted_task("Render pass", TaskStatus::Todo, 2);

    task.move_to(TaskStatus::InProgress, 7);

    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.position(), 7);
}

#[rstest]
fn archive_requires_done_column() {
    let mut task = persisted_task("Sound mix", TaskStatus::InProgress, 0);
    let task_id = task.id();

    let result = task.archive_at(base_time());

    assert_eq!(
        result,
        Err(BoardDomainError::ArchiveRequiresDone {
            task_id,
            status: TaskStatus::InProgress,
        })
    );
    assert!(!task.is_archived());
}

#[rstest]
fn archive_then_restore_round_trip() -> eyre::Result<()> {
    let mut task = persisted_task("Final export", TaskStatus::Done, 1);

    task.archive_at(base_time())?;
    ensure!(task.is_archived());
    ensure!(task.archived_at() == Some(base_time()));

    task.restore()?;
    ensure!(!task.is_archived());
    ensure!(task.status() == TaskStatus::Done);
    Ok(())
}

#[rstest]
fn restore_rejects_active_task() {
    let mut task = persisted_task("Thumbnail draft", TaskStatus::Done, 0);
    let task_id = task.id();

    let result = task.restore();

    assert_eq!(result, Err(BoardDomainError::NotArchived(task_id)));
}

#[rstest]
fn touch_at_records_mutation_instant() {
    let mut task = persisted_task("Subtitles", TaskStatus::Todo, 0);
    let later = base_time() + Duration::minutes(5);

    task.touch_at(later);

    assert_eq!(task.updated_at(), later);
}

#[rstest]
fn checklist_toggle_flips_item() -> eyre::Result<()> {
    let mut checklist = Checklist::from_items(vec![
        ChecklistItem::new("Record voiceover"),
        ChecklistItem::new("Sync captions"),
    ]);

    checklist.toggle(1)?;

    let items = checklist.items();
    ensure!(items.first().is_some_and(|item| !item.checked()));
    ensure!(items.get(1).is_some_and(ChecklistItem::checked));
    Ok(())
}

#[rstest]
fn checklist_toggle_rejects_out_of_bounds() {
    let mut checklist = Checklist::from_items(vec![ChecklistItem::new("Upload master")]);

    let result = checklist.toggle(3);

    assert_eq!(
        result,
        Err(BoardDomainError::ChecklistIndexOutOfBounds { index: 3, len: 1 })
    );
}

#[rstest]
#[case("todo", TaskStatus::Todo)]
#[case("in_progress", TaskStatus::InProgress)]
#[case("done", TaskStatus::Done)]
#[case("  DONE  ", TaskStatus::Done)]
fn status_parses_storage_form(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn status_rejects_unknown_value() {
    assert!(TaskStatus::try_from("blocked").is_err());
}

#[rstest]
#[case("low", TaskPriority::Low)]
#[case("medium", TaskPriority::Medium)]
#[case("high", TaskPriority::High)]
fn priority_parses_storage_form(#[case] raw: &str, #[case] expected: TaskPriority) {
    assert_eq!(TaskPriority::try_from(raw), Ok(expected));
}
