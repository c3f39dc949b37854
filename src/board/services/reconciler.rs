//! Drag-move reconciliation between a client mirror and the task store.
//!
//! Each connected client holds a transient, possibly-stale mirror of the
//! active board. A cross-column drag applies an optimistic local mutation so
//! the UI responds before the network round-trip completes, then persists
//! the move and re-fetches the authoritative list — on success or failure —
//! so the mirror never diverges from the store past one refetch cycle.

use crate::auth::AuthContext;
use crate::board::{
    domain::{Task, TaskId, TaskStatus, next_position},
    ports::{TaskStore, TaskStoreError},
    services::{BoardService, BoardServiceError, BoardServiceResult},
};
use mockable::Clock;

/// Phase of the most recent move through the reconciler's state machine.
///
/// Every move runs `Idle → Pending → {Committed | RolledBack}`; a
/// same-column drop stays `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovePhase {
    /// No move attempted, or the last gesture was a no-op.
    #[default]
    Idle,
    /// An optimistic mutation is applied and the write is in flight.
    Pending,
    /// The write persisted and the mirror was refreshed from the store.
    Committed,
    /// The write failed; the optimistic mutation was discarded.
    RolledBack,
}

/// Result of a drag-move gesture.
#[derive(Debug)]
pub enum MoveOutcome {
    /// Destination equals the task's current column; no store call issued.
    NoOp,
    /// The move persisted and the mirror holds the authoritative board.
    Committed,
    /// The write failed and the optimistic mutation was rolled back; the
    /// carried error is what the UI should report.
    RolledBack(BoardServiceError),
}

/// Translates drag gestures into persisted moves with UI-consistency
/// recovery.
pub struct DragMoveReconciler<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    service: BoardService<S, C>,
    mirror: Vec<Task>,
    phase: MovePhase,
}

impl<S, C> DragMoveReconciler<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a reconciler with an empty mirror.
    ///
    /// Call [`Self::refresh`] to populate it before handling gestures.
    #[must_use]
    pub const fn new(service: BoardService<S, C>) -> Self {
        Self {
            service,
            mirror: Vec::new(),
            phase: MovePhase::Idle,
        }
    }

    /// Replaces the mirror with the store's authoritative active board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the listing fails; the
    /// previous mirror is kept.
    pub async fn refresh(&mut self) -> BoardServiceResult<()> {
        self.mirror = self.service.list_active_tasks().await?;
        Ok(())
    }

    /// Returns the mirrored board in listing order.
    #[must_use]
    pub fn board(&self) -> &[Task] {
        &self.mirror
    }

    /// Returns the mirrored tasks of one column, in listing order.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        self.mirror
            .iter()
            .filter(|task| task.status() == status)
            .collect()
    }

    /// Returns the phase the last gesture ended in.
    #[must_use]
    pub const fn phase(&self) -> MovePhase {
        self.phase
    }

    /// Handles a drag gesture dropping task `id` onto the `dest` column.
    ///
    /// The destination position is computed from the cached mirror — a
    /// known staleness risk accepted by the design — while the optimistic
    /// mutation keeps the UI responsive during the write. Success and
    /// failure both end in an authoritative refetch. There is no automatic
    /// retry.
    ///
    /// If the post-commit or post-rollback refetch itself fails, the
    /// outcome of the write stands, a warning is logged, and the mirror
    /// converges on the next successful [`Self::refresh`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when `id` is not in the mirror;
    /// no store call is issued.
    pub async fn move_task(
        &mut self,
        auth: &AuthContext,
        id: TaskId,
        dest: TaskStatus,
    ) -> BoardServiceResult<MoveOutcome> {
        let Some(current) = self.mirror.iter().find(|task| task.id() == id) else {
            return Err(TaskStoreError::NotFound(id).into());
        };
        if current.status() == dest {
            self.phase = MovePhase::Idle;
            return Ok(MoveOutcome::NoOp);
        }

        // Destination position comes from the snapshot as it was before
        // the optimistic flip, so the dragged task does not count itself.
        let position = next_position(
            self.mirror
                .iter()
                .filter(|task| task.status() == dest)
                .map(Task::position),
        );
        let snapshot = self.mirror.clone();
        self.phase = MovePhase::Pending;
        if let Some(task) = self.mirror.iter_mut().find(|task| task.id() == id) {
            task.move_to(dest, position);
        }

        match self.service.update_task_status(auth, id, dest, position).await {
            Ok(()) => {
                if let Err(refetch_err) = self.refresh().await {
                    tracing::warn!(
                        error = %refetch_err,
                        "post-commit refetch failed; mirror converges on next refresh"
                    );
                }
                self.phase = MovePhase::Committed;
                Ok(MoveOutcome::Committed)
            }
            Err(err) => {
                self.mirror = snapshot;
                if let Err(refetch_err) = self.refresh().await {
                    tracing::warn!(
                        error = %refetch_err,
                        "post-rollback refetch failed; mirror reverted to pre-move snapshot"
                    );
                }
                self.phase = MovePhase::RolledBack;
                Ok(MoveOutcome::RolledBack(err))
            }
        }
    }
}
