//! In-memory task store for tests and offline demos.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use crate::board::{
    domain::{
        NewProject, NewTask, Project, ProjectId, ProjectRecord, Task, TaskCollection, TaskId,
        TaskPatch,
    },
    ports::TaskStore,
};
use crate::remote::{RemoteError, RemoteResult};

/// A call received by [`InMemoryTaskStore`], recorded in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `fetch_tasks`.
    FetchTasks,
    /// `fetch_projects`.
    FetchProjects,
    /// `create_task` with its payload.
    CreateTask(NewTask),
    /// `update_task` with its target and payload.
    UpdateTask {
        /// Target task.
        id: TaskId,
        /// Fields sent to the store.
        patch: TaskPatch,
    },
    /// `delete_task`.
    DeleteTask(TaskId),
    /// `create_project` with its payload.
    CreateProject(NewProject),
    /// `delete_project`.
    DeleteProject(ProjectId),
}

impl StoreCall {
    /// Returns the operation this call belongs to.
    #[must_use]
    pub const fn operation(&self) -> StoreOperation {
        match self {
            Self::FetchTasks => StoreOperation::FetchTasks,
            Self::FetchProjects => StoreOperation::FetchProjects,
            Self::CreateTask(_) => StoreOperation::CreateTask,
            Self::UpdateTask { .. } => StoreOperation::UpdateTask,
            Self::DeleteTask(_) => StoreOperation::DeleteTask,
            Self::CreateProject(_) => StoreOperation::CreateProject,
            Self::DeleteProject(_) => StoreOperation::DeleteProject,
        }
    }
}

/// Store operations that can be scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// `fetch_tasks`.
    FetchTasks,
    /// `fetch_projects`.
    FetchProjects,
    /// `create_task`.
    CreateTask,
    /// `update_task`.
    UpdateTask,
    /// `delete_task`.
    DeleteTask,
    /// `create_project`.
    CreateProject,
    /// `delete_project`.
    DeleteProject,
}

/// Thread-safe in-memory task store.
///
/// Identifiers are assigned sequentially from 1. Every call is recorded, and
/// failures can be queued per operation with [`InMemoryTaskStore::fail_next`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    tasks: TaskCollection,
    projects: Vec<Project>,
    last_task_id: u64,
    last_project_id: u64,
    calls: Vec<StoreCall>,
    failures: HashMap<StoreOperation, VecDeque<RemoteError>>,
}

impl InMemoryStoreState {
    fn begin(&mut self, call: StoreCall) -> RemoteResult<()> {
        let operation = call.operation();
        self.calls.push(call);
        match self
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn project_exists(&self, id: ProjectId) -> bool {
        self.projects.iter().any(|project| project.id() == id)
    }

    fn task_count(&self, id: ProjectId) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.project_id() == Some(id))
            .count()
    }
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds tasks directly, bypassing call recording.
    ///
    /// Later identifiers assigned by `create_task` continue after the highest
    /// seeded identifier.
    #[must_use]
    pub fn with_tasks(self, tasks: impl IntoIterator<Item = Task>) -> Self {
        {
            let mut state = self.write();
            for task in tasks {
                state.last_task_id = state.last_task_id.max(task.id().value());
                state.tasks.upsert(task);
            }
        }
        self
    }

    /// Seeds projects directly, bypassing call recording.
    #[must_use]
    pub fn with_projects(self, projects: impl IntoIterator<Item = Project>) -> Self {
        {
            let mut state = self.write();
            for project in projects {
                state.last_project_id = state.last_project_id.max(project.id().value());
                state.projects.push(project);
            }
        }
        self
    }

    /// Queues a failure for the next call of `operation`.
    pub fn fail_next(&self, operation: StoreOperation, error: RemoteError) {
        self.write()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Returns every call received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.read().calls.clone()
    }

    /// Returns the calls received for one operation.
    #[must_use]
    pub fn calls_for(&self, operation: StoreOperation) -> Vec<StoreCall> {
        self.read()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .cloned()
            .collect()
    }

    /// Returns the stored task with `id`.
    #[must_use]
    pub fn stored_task(&self, id: TaskId) -> Option<Task> {
        self.read().tasks.get(id).cloned()
    }

    /// Returns the number of stored tasks.
    #[must_use]
    pub fn stored_task_count(&self) -> usize {
        self.read().tasks.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, InMemoryStoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryStoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn fetch_tasks(&self) -> RemoteResult<Vec<Task>> {
        let mut state = self.write();
        state.begin(StoreCall::FetchTasks)?;
        Ok(state.tasks.iter().cloned().collect())
    }

    async fn fetch_projects(&self) -> RemoteResult<Vec<Project>> {
        let mut state = self.write();
        state.begin(StoreCall::FetchProjects)?;
        let projects = state
            .projects
            .iter()
            .map(|project| {
                Project::from_record(ProjectRecord {
                    id: project.id(),
                    name: project.name().to_owned(),
                    description: project.description().to_owned(),
                    deadline: project.deadline(),
                    task_count: state.task_count(project.id()),
                    created_at: project.created_at(),
                    creator: project.creator().map(str::to_owned),
                })
            })
            .collect();
        Ok(projects)
    }

    async fn create_task(&self, task: &NewTask) -> RemoteResult<Task> {
        let mut state = self.write();
        state.begin(StoreCall::CreateTask(task.clone()))?;
        if let Some(project_id) = task.project_id()
            && !state.project_exists(project_id)
        {
            return Err(RemoteError::NotFound("Project not found".to_owned()));
        }
        state.last_task_id += 1;
        let created = Task::from_new(TaskId::new(state.last_task_id), task.clone());
        state.tasks.upsert(created.clone());
        Ok(created)
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RemoteResult<Task> {
        let mut state = self.write();
        state.begin(StoreCall::UpdateTask {
            id,
            patch: patch.clone(),
        })?;
        let task = state
            .tasks
            .get_mut(id)
            .ok_or_else(|| RemoteError::NotFound(format!("task {id}")))?;
        task.apply(patch);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> RemoteResult<()> {
        let mut state = self.write();
        state.begin(StoreCall::DeleteTask(id))?;
        state
            .tasks
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RemoteError::NotFound(format!("task {id}")))
    }

    async fn create_project(&self, project: &NewProject) -> RemoteResult<Project> {
        let mut state = self.write();
        state.begin(StoreCall::CreateProject(project.clone()))?;
        state.last_project_id += 1;
        let created = Project::from_record(ProjectRecord {
            id: ProjectId::new(state.last_project_id),
            name: project.name().to_owned(),
            description: project.description().to_owned(),
            deadline: project.deadline(),
            task_count: 0,
            created_at: None,
            creator: None,
        });
        state.projects.push(created.clone());
        Ok(created)
    }

    async fn delete_project(&self, id: ProjectId) -> RemoteResult<()> {
        let mut state = self.write();
        state.begin(StoreCall::DeleteProject(id))?;
        if !state.project_exists(id) {
            return Err(RemoteError::NotFound(format!("project {id}")));
        }
        state.projects.retain(|project| project.id() != id);
        state.tasks.remove_project(id);
        Ok(())
    }
}
