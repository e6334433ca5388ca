//! Outcomes of board mutations and the in-flight move token.

use crate::board::domain::{TaskId, TaskStatus};

/// Result of a status move that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task was unknown or already had the target status; nothing was
    /// sent to the store.
    Skipped,
    /// The store accepted the new status.
    Persisted,
}

/// Result of a drag-and-drop gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The task was dropped where it started, or the gesture was stale.
    Unchanged,
    /// The task moved within its bucket; nothing was sent to the store.
    Reordered,
    /// The task was dropped on another bucket.
    Moved(MoveOutcome),
}

/// Result of a delete that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was unknown locally; nothing was sent to the store.
    Skipped,
    /// The store deleted the record and it was removed locally.
    Deleted,
}

/// An optimistic status change awaiting confirmation from the store.
///
/// Produced by [`super::TaskBoardController::begin_move`] and consumed by
/// [`super::TaskBoardController::settle_move`]. The recorded revision and
/// epoch let the controller discard outcomes that a newer move or a reload
/// has superseded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending move must be settled with the store's outcome"]
pub struct PendingMove {
    pub(super) task_id: TaskId,
    pub(super) previous: TaskStatus,
    pub(super) target: TaskStatus,
    pub(super) revision: u64,
    pub(super) epoch: u64,
}

impl PendingMove {
    /// Returns the task being moved.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status before the move.
    #[must_use]
    pub const fn previous(&self) -> TaskStatus {
        self.previous
    }

    /// Returns the status the task was moved to.
    #[must_use]
    pub const fn target(&self) -> TaskStatus {
        self.target
    }
}
