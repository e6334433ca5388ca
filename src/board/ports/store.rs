//! Remote store port for tasks and projects.

use crate::board::domain::{NewProject, NewTask, Project, ProjectId, Task, TaskId, TaskPatch};
use crate::remote::RemoteResult;
use async_trait::async_trait;

/// Task and project persistence contract.
///
/// Every call is authorised by the caller's bearer credential; an
/// implementation returns [`crate::remote::RemoteError::Unauthorized`] when
/// the store rejects it.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetches every task visible to the authenticated user.
    async fn fetch_tasks(&self) -> RemoteResult<Vec<Task>>;

    /// Fetches every project visible to the authenticated user, each with its
    /// derived task count.
    async fn fetch_projects(&self) -> RemoteResult<Vec<Project>>;

    /// Creates a task and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::remote::RemoteError::NotFound`] when the referenced
    /// project does not exist.
    async fn create_task(&self, task: &NewTask) -> RemoteResult<Task>;

    /// Applies a partial update and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::remote::RemoteError::NotFound`] when the task does
    /// not exist.
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RemoteResult<Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::remote::RemoteError::NotFound`] when the task does
    /// not exist.
    async fn delete_task(&self, id: TaskId) -> RemoteResult<()>;

    /// Creates a project and returns the stored record.
    async fn create_project(&self, project: &NewProject) -> RemoteResult<Project>;

    /// Deletes a project together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`crate::remote::RemoteError::NotFound`] when the project does
    /// not exist.
    async fn delete_project(&self, id: ProjectId) -> RemoteResult<()>;
}
