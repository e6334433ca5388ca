//! Service-level errors and the recorded failure shown to users.

use crate::board::domain::{BoardDomainError, ProjectId, TaskId};
use crate::remote::{ErrorKind, RemoteError};
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

/// Errors returned by task board operations.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    /// A client-side guard rejected the input.
    #[error(transparent)]
    Validation(#[from] BoardDomainError),
    /// The remote store call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl BoardError {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationFailure,
            Self::Remote(err) => err.kind(),
        }
    }
}

/// Result type for task board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// The user action a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardOperation {
    /// Fetching the task collection.
    LoadTasks,
    /// Fetching the project list.
    LoadProjects,
    /// Moving a task to another status.
    MoveTask(TaskId),
    /// Creating a task.
    CreateTask,
    /// Deleting a task.
    DeleteTask(TaskId),
    /// Creating a project.
    CreateProject,
    /// Deleting a project.
    DeleteProject(ProjectId),
}

impl fmt::Display for BoardOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadTasks => f.write_str("Failed to fetch tasks"),
            Self::LoadProjects => f.write_str("Failed to fetch projects"),
            Self::MoveTask(id) => write!(f, "Failed to update task {id}"),
            Self::CreateTask => f.write_str("Failed to create task"),
            Self::DeleteTask(id) => write!(f, "Failed to delete task {id}"),
            Self::CreateProject => f.write_str("Failed to create project"),
            Self::DeleteProject(id) => write!(f, "Failed to delete project {id}"),
        }
    }
}

/// The last error surfaced by the controller.
#[derive(Debug, Clone)]
pub struct BoardFailure {
    /// Operation that failed.
    pub operation: BoardOperation,
    /// Underlying error.
    pub error: BoardError,
    /// When the failure was recorded.
    pub occurred_at: DateTime<Utc>,
}

impl BoardFailure {
    /// Returns the coarse classification of the underlying error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// Returns a one-line message suitable for an error banner.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{}: {}", self.operation, self.error)
    }
}
