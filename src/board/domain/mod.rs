//! Domain model for the task board.
//!
//! Tasks and projects are records owned by the remote store; the types here
//! describe the client-side cache of those records and the views derived
//! from it. Nothing in this module performs I/O.

mod board;
mod calendar;
mod collection;
mod dashboard;
mod error;
mod ids;
mod project;
mod task;

pub use board::Board;
pub use calendar::{CalendarEntry, CalendarView};
pub use collection::TaskCollection;
pub use dashboard::{DashboardSummary, RECENT_LIMIT};
pub use error::{BoardDomainError, ParsePriorityError, ParseTaskStatusError};
pub use ids::{DraftId, ProjectId, TaskId};
pub use project::{NewProject, Project, ProjectRecord};
pub use task::{NewTask, Priority, Task, TaskPatch, TaskRecord, TaskStatus};
