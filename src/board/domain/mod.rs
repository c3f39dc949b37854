//! Domain model for the kanban task board.
//!
//! The board domain models task creation, column membership, intra-column
//! ordering, archival, and restoration while keeping all infrastructure
//! concerns outside of the domain boundary.

mod checklist;
mod error;
mod ids;
mod ordering;
mod task;

pub use checklist::{Checklist, ChecklistItem};
pub use error::{BoardDomainError, ParseTaskPriorityError, ParseTaskStatusError};
pub use ids::{TaskId, UserId};
pub use ordering::next_position;
pub use task::{NewTaskData, PersistedTaskData, Task, TaskPriority, TaskStatus};
