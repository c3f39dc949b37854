//! Application services for board orchestration.

mod board;
mod reconciler;

pub use board::{
    BoardService, BoardServiceError, BoardServiceResult, CreateTaskRequest, TaskEdit,
    TaskWithAuthor, with_authors,
};
pub use reconciler::{DragMoveReconciler, MoveOutcome, MovePhase};
