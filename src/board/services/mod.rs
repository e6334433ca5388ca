//! Application services for the task board.

mod controller;
mod error;
mod outcome;

pub use controller::{BoardPolicy, DraftTask, TaskBoardController};
pub use error::{BoardError, BoardFailure, BoardOperation, BoardResult};
pub use outcome::{DeleteOutcome, DropOutcome, MoveOutcome, PendingMove};
