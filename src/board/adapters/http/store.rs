//! [`TaskStore`] implementation backed by the task API.

use super::models::{
    NewProjectPayload, NewTaskPayload, ProjectPayload, TaskPatchPayload, TaskPayload,
    decode_task_list,
};
use crate::board::{
    domain::{NewProject, NewTask, Project, ProjectId, Task, TaskId, TaskPatch},
    ports::TaskStore,
};
use crate::remote::{ApiClient, RemoteResult};
use async_trait::async_trait;
use tracing::debug;

const TASKS_PATH: &str = "/api/tasks/";
const PROJECTS_PATH: &str = "/api/projects/";

/// Remote task store speaking the task API's JSON format.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: ApiClient,
}

impl HttpTaskStore {
    /// Wraps a configured API client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

fn task_path(id: TaskId) -> String {
    format!("/api/tasks/{id}")
}

fn project_path(id: ProjectId) -> String {
    format!("/api/projects/{id}")
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    async fn fetch_tasks(&self) -> RemoteResult<Vec<Task>> {
        let records: Vec<serde_json::Value> = self.client.get_json(TASKS_PATH).await?;
        let payloads = decode_task_list(records);
        debug!(count = payloads.len(), "fetched tasks");
        Ok(payloads.into_iter().map(Task::from).collect())
    }

    async fn fetch_projects(&self) -> RemoteResult<Vec<Project>> {
        let payloads: Vec<ProjectPayload> = self.client.get_json(PROJECTS_PATH).await?;
        debug!(count = payloads.len(), "fetched projects");
        Ok(payloads.into_iter().map(Project::from).collect())
    }

    async fn create_task(&self, task: &NewTask) -> RemoteResult<Task> {
        let payload: TaskPayload = self
            .client
            .post_json(TASKS_PATH, &NewTaskPayload::from(task))
            .await?;
        Ok(Task::from(payload))
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RemoteResult<Task> {
        let payload: TaskPayload = self
            .client
            .put_json(&task_path(id), &TaskPatchPayload::from(patch))
            .await?;
        Ok(Task::from(payload))
    }

    async fn delete_task(&self, id: TaskId) -> RemoteResult<()> {
        self.client.delete(&task_path(id)).await
    }

    async fn create_project(&self, project: &NewProject) -> RemoteResult<Project> {
        let payload: ProjectPayload = self
            .client
            .post_json(PROJECTS_PATH, &NewProjectPayload::from(project))
            .await?;
        Ok(Project::from(payload))
    }

    async fn delete_project(&self, id: ProjectId) -> RemoteResult<()> {
        self.client.delete(&project_path(id)).await
    }
}
