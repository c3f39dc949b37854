//! Behavioural integration tests for the board and profile services.
//!
//! These exercise the public crate surface in realistic multi-step flows: a
//! full task lifecycle from creation through drag-moves to archival and
//! restore, and author decoration of a listed board.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use mockable::DefaultClock;
use vmlog::auth::AuthContext;
use vmlog::board::{
    adapters::memory::InMemoryTaskStore,
    domain::{TaskStatus, UserId},
    services::{
        BoardService, CreateTaskRequest, DragMoveReconciler, MoveOutcome, MovePhase, TaskEdit,
        with_authors,
    },
};
use vmlog::profile::{
    adapters::memory::InMemoryProfileStore,
    domain::{Profile, UserColor},
    services::{ProfileService, UpdateProfileRequest},
};

fn board_service(store: &Arc<InMemoryTaskStore>) -> BoardService<InMemoryTaskStore, DefaultClock> {
    BoardService::new(Arc::clone(store), Arc::new(DefaultClock))
}

#[tokio::test(flavor = "multi_thread")]
async fn full_task_lifecycle_through_the_public_surface() {
    let store = Arc::new(InMemoryTaskStore::new());
    let service = board_service(&store);
    let auth = AuthContext::authenticated(UserId::new());

    // A fresh board fills the todo column left to right.
    let script = service
        .create_task(&auth, CreateTaskRequest::new("Write script"))
        .await
        .expect("create script");
    let film = service
        .create_task(&auth, CreateTaskRequest::new("Film b-roll"))
        .await
        .expect("create filming");
    assert_eq!(script.position(), 0);
    assert_eq!(film.position(), 1);

    // Edits touch descriptive fields without reordering anything.
    service
        .update_task(
            &auth,
            film.id(),
            TaskEdit::new().with_description("Golden hour at the harbour"),
        )
        .await
        .expect("edit task");

    // Drag the script through the workflow with a mirrored reconciler.
    let mut reconciler = DragMoveReconciler::new(board_service(&store));
    reconciler.refresh().await.expect("initial refresh");
    let first_move = reconciler
        .move_task(&auth, script.id(), TaskStatus::InProgress)
        .await
        .expect("move to in progress");
    assert!(matches!(first_move, MoveOutcome::Committed));
    let second_move = reconciler
        .move_task(&auth, script.id(), TaskStatus::Done)
        .await
        .expect("move to done");
    assert!(matches!(second_move, MoveOutcome::Committed));
    assert_eq!(reconciler.phase(), MovePhase::Committed);

    // Sweep the finished work into the archive.
    service
        .archive_completed_tasks(&auth)
        .await
        .expect("archive sweep");
    let active = service.list_active_tasks().await.expect("active listing");
    assert_eq!(active.len(), 1);
    assert_eq!(
        active.first().map(vmlog::board::domain::Task::id),
        Some(film.id())
    );
    let archived = service
        .list_archived_tasks()
        .await
        .expect("archived listing");
    assert_eq!(archived.len(), 1);

    // A restored task lands back on the board under done.
    service
        .restore_task(&auth, script.id())
        .await
        .expect("restore");
    let refreshed = service.list_active_tasks().await.expect("active listing");
    let restored = refreshed
        .iter()
        .find(|task| task.id() == script.id())
        .expect("restored task is active");
    assert_eq!(restored.status(), TaskStatus::Done);
    assert!(!restored.is_archived());
}

#[tokio::test(flavor = "multi_thread")]
async fn listed_board_is_decorated_with_author_profiles() {
    let clock = DefaultClock;
    let task_store = Arc::new(InMemoryTaskStore::new());
    let profile_store = Arc::new(InMemoryProfileStore::new());
    let board = board_service(&task_store);
    let profiles = ProfileService::new(Arc::clone(&profile_store), Arc::new(DefaultClock));

    let author_id = UserId::new();
    let author = Profile::new(author_id, "Casey", &clock).expect("provision profile");
    profile_store.seed(author).expect("seed profile");
    let auth = AuthContext::authenticated(author_id);

    profiles
        .update_profile(
            &auth,
            UpdateProfileRequest::new("Casey Videos").with_color(UserColor::Emerald),
        )
        .await
        .expect("profile edit");

    board
        .create_task(&auth, CreateTaskRequest::new("Storyboard episode 3"))
        .await
        .expect("create task");
    // A task authored by a member who since vanished from the directory.
    let orphan_auth = AuthContext::authenticated(UserId::new());
    board
        .create_task(&orphan_auth, CreateTaskRequest::new("Unclaimed idea"))
        .await
        .expect("create orphan task");

    let directory = profiles.directory().await.expect("directory");
    let listed = board.list_active_tasks().await.expect("active listing");
    let decorated = with_authors(listed, &directory);

    assert_eq!(decorated.len(), 2);
    let storyboard = decorated
        .iter()
        .find(|entry| entry.task.title() == "Storyboard episode 3")
        .expect("storyboard entry");
    let by = storyboard.author.as_ref().expect("known author");
    assert_eq!(by.display_name(), "Casey Videos");
    assert_eq!(by.effective_color(), UserColor::Emerald);
    let orphan = decorated
        .iter()
        .find(|entry| entry.task.title() == "Unclaimed idea")
        .expect("orphan entry");
    assert!(orphan.author.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn pre_migration_deployment_degrades_without_failing() {
    let store = Arc::new(InMemoryTaskStore::without_archiving());
    let service = board_service(&store);
    let auth = AuthContext::authenticated(UserId::new());

    let task = service
        .create_task(&auth, CreateTaskRequest::new("Stuck in the past"))
        .await
        .expect("create task");
    service
        .update_task_status(&auth, task.id(), TaskStatus::Done, 0)
        .await
        .expect("move to done");

    // The sweep and the archive listing both degrade to no-ops.
    service
        .archive_completed_tasks(&auth)
        .await
        .expect("degraded sweep");
    assert!(
        service
            .list_archived_tasks()
            .await
            .expect("degraded listing")
            .is_empty()
    );
    let active = service.list_active_tasks().await.expect("active listing");
    assert_eq!(active.len(), 1);
}
