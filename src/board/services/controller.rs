//! Task board controller: the cached collection, optimistic status moves,
//! and reconciliation with the remote store.

use super::{
    BoardError, BoardFailure, BoardOperation, BoardResult, DeleteOutcome, DropOutcome,
    MoveOutcome, PendingMove,
};
use crate::board::{
    domain::{
        Board, CalendarView, DashboardSummary, DraftId, NewProject, NewTask, Project, ProjectId,
        Task, TaskCollection, TaskId, TaskPatch, TaskStatus,
    },
    ports::TaskStore,
};
use crate::config::ClientConfig;
use crate::remote::RemoteResult;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Client-side rules applied before remote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardPolicy {
    /// Whether new tasks must reference a project.
    pub require_project: bool,
}

impl Default for BoardPolicy {
    fn default() -> Self {
        Self {
            require_project: true,
        }
    }
}

impl From<&ClientConfig> for BoardPolicy {
    fn from(config: &ClientConfig) -> Self {
        Self {
            require_project: config.require_project,
        }
    }
}

/// A task whose creation has been sent to the store but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftTask {
    /// Client-generated key.
    pub id: DraftId,
    /// Fields sent to the store.
    pub task: NewTask,
    /// When the creation was started.
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct BoardState {
    tasks: TaskCollection,
    projects: Vec<Project>,
    drafts: Vec<DraftTask>,
    loads_in_flight: usize,
    last_error: Option<BoardFailure>,
    // Bumped on every optimistic move of a task.
    revisions: HashMap<TaskId, u64>,
    // Bumped whenever a fetch replaces the collection.
    epoch: u64,
}

/// Owns the client-side task cache and mediates every change to it.
///
/// The controller is the only writer of its state. Methods take `&self`, so
/// several operations may be in flight at once; the state lock is never
/// held across a remote call.
pub struct TaskBoardController<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    policy: BoardPolicy,
    state: Mutex<BoardState>,
}

impl<S, C> TaskBoardController<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a controller with an empty cache and the default policy.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            policy: BoardPolicy::default(),
            state: Mutex::new(BoardState::default()),
        }
    }

    /// Replaces the client-side policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: BoardPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetches tasks and projects concurrently and replaces the cache.
    ///
    /// The two fetches are independent: whichever succeeds replaces its part
    /// of the cache, and a failed part keeps the previously loaded data.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error (tasks before projects); it is also
    /// recorded as the last error.
    pub async fn load(&self) -> BoardResult<()> {
        self.lock().loads_in_flight += 1;
        info!("loading tasks and projects");
        let (tasks, projects) = tokio::join!(self.store.fetch_tasks(), self.store.fetch_projects());
        self.finish_load(tasks, projects)
    }

    /// Moves a task to `target` and persists the change.
    ///
    /// The local status changes before the store is called. Unknown tasks and
    /// moves to the current status are skipped without a remote call.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Remote`] when the store rejects the change; the
    /// local status has then been reverted unless a newer move superseded it.
    pub async fn move_task(&self, task_id: TaskId, target: TaskStatus) -> BoardResult<MoveOutcome> {
        let Some(pending) = self.begin_move(task_id, target) else {
            return Ok(MoveOutcome::Skipped);
        };
        let result = self
            .store
            .update_task(task_id, &TaskPatch::status(target))
            .await
            .map(|_| ());
        self.settle_move(pending, result)
    }

    /// Applies the optimistic half of a move.
    ///
    /// Returns `None`, changing nothing, when the task is unknown or already
    /// has `target`.
    #[must_use]
    pub fn begin_move(&self, task_id: TaskId, target: TaskStatus) -> Option<PendingMove> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let Some(task) = state.tasks.get_mut(task_id) else {
            debug!(%task_id, "move ignored, task not loaded");
            return None;
        };
        if task.status() == target {
            debug!(%task_id, status = %target, "move ignored, status unchanged");
            return None;
        }

        let previous = task.set_status(target);
        let revision = state.revisions.entry(task_id).or_default();
        *revision += 1;
        info!(%task_id, from = %previous, to = %target, "task moved locally");
        Some(PendingMove {
            task_id,
            previous,
            target,
            revision: *revision,
            epoch: state.epoch,
        })
    }

    /// Applies the store's answer to a pending move.
    ///
    /// A failure reverts the task to its previous status only while the move
    /// is still the latest local change for that task; a failure that
    /// arrives after a newer move or a reload leaves the local state alone.
    ///
    /// # Errors
    ///
    /// Returns the store error, which is also recorded as the last error.
    pub fn settle_move(&self, pending: PendingMove, result: RemoteResult<()>) -> BoardResult<MoveOutcome> {
        let PendingMove {
            task_id,
            previous,
            target,
            revision,
            epoch,
        } = pending;
        let Err(err) = result else {
            debug!(%task_id, status = %target, "move persisted");
            return Ok(MoveOutcome::Persisted);
        };

        let mut guard = self.lock();
        let state = &mut *guard;
        let is_latest = state.epoch == epoch && state.revisions.get(&task_id) == Some(&revision);
        match state.tasks.get_mut(task_id) {
            Some(task) if is_latest && task.status() == target => {
                task.set_status(previous);
                warn!(%task_id, restored = %previous, error = %err, "move rejected, status reverted");
            }
            _ => {
                warn!(%task_id, error = %err, "move rejected after a newer change, keeping local state");
            }
        }
        Err(self.fail(state, BoardOperation::MoveTask(task_id), err.into()))
    }

    /// Handles a drag-and-drop gesture.
    ///
    /// Dropping onto another bucket is a [`Self::move_task`]. Dropping within
    /// the same bucket only reorders the local display; the store has no
    /// notion of order within a status.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying move.
    pub async fn reorder_within_move(
        &self,
        source: TaskStatus,
        destination: TaskStatus,
        source_index: usize,
        destination_index: usize,
        task_id: TaskId,
    ) -> BoardResult<DropOutcome> {
        if source != destination {
            return self
                .move_task(task_id, destination)
                .await
                .map(DropOutcome::Moved);
        }
        if source_index == destination_index {
            return Ok(DropOutcome::Unchanged);
        }
        Ok(self.reorder_locally(source, source_index, destination_index, task_id))
    }

    /// Validates and creates a task.
    ///
    /// While the call is in flight the request is listed in
    /// [`Self::drafts`]; on success the store's record replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] without calling the store when the
    /// title is blank or a required project is missing, and
    /// [`BoardError::Remote`] when the store rejects the task.
    pub async fn create_task(&self, new_task: NewTask) -> BoardResult<Task> {
        let draft_id = self.begin_create(&new_task)?;
        let result = self.store.create_task(&new_task).await;
        self.finish_create(draft_id, result)
    }

    /// Deletes a task from the store, then from the cache.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Remote`] when the store rejects the delete; the
    /// task stays in the cache.
    pub async fn delete_task(&self, task_id: TaskId) -> BoardResult<DeleteOutcome> {
        if !self.has_task(task_id) {
            debug!(%task_id, "delete ignored, task not loaded");
            return Ok(DeleteOutcome::Skipped);
        }
        let result = self.store.delete_task(task_id).await;
        self.finish_delete(task_id, result)
    }

    /// Validates and creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for a blank name and
    /// [`BoardError::Remote`] when the store rejects the project.
    pub async fn create_project(&self, new_project: NewProject) -> BoardResult<Project> {
        if let Err(err) = new_project.validate() {
            return Err(self.record(BoardOperation::CreateProject, err.into()));
        }
        match self.store.create_project(&new_project).await {
            Ok(project) => {
                info!(project_id = %project.id(), "project created");
                self.lock().projects.push(project.clone());
                Ok(project)
            }
            Err(err) => Err(self.record(BoardOperation::CreateProject, err.into())),
        }
    }

    /// Deletes a project and, once the store confirms, its cached tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Remote`] when the store rejects the delete.
    pub async fn delete_project(&self, project_id: ProjectId) -> BoardResult<DeleteOutcome> {
        if !self.has_project(project_id) {
            debug!(%project_id, "delete ignored, project not loaded");
            return Ok(DeleteOutcome::Skipped);
        }
        match self.store.delete_project(project_id).await {
            Ok(()) => {
                let mut state = self.lock();
                state.projects.retain(|project| project.id() != project_id);
                let removed = state.tasks.remove_project(project_id);
                info!(%project_id, removed_tasks = removed, "project deleted");
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) => Err(self.record(BoardOperation::DeleteProject(project_id), err.into())),
        }
    }

    /// Returns the current kanban view.
    #[must_use]
    pub fn board(&self) -> Board {
        Board::from_collection(&self.lock().tasks)
    }

    /// Returns every cached task in display order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.iter().cloned().collect()
    }

    /// Returns the cached task with `task_id`.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<Task> {
        self.lock().tasks.get(task_id).cloned()
    }

    /// Returns the cached projects in store order.
    #[must_use]
    pub fn projects(&self) -> Vec<Project> {
        self.lock().projects.clone()
    }

    /// Returns task creations still awaiting the store.
    #[must_use]
    pub fn drafts(&self) -> Vec<DraftTask> {
        self.lock().drafts.clone()
    }

    /// Returns `true` while at least one load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loads_in_flight > 0
    }

    /// Returns the last surfaced error, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<BoardFailure> {
        self.lock().last_error.clone()
    }

    /// Dismisses the last surfaced error.
    pub fn clear_error(&self) {
        self.lock().last_error = None;
    }

    /// Returns the tasks due in `year`/`month`.
    #[must_use]
    pub fn calendar(&self, year: i32, month: u32) -> CalendarView {
        let state = self.lock();
        CalendarView::for_month(state.tasks.iter(), &state.projects, year, month)
    }

    /// Returns the dashboard summary as of the clock's current date.
    #[must_use]
    pub fn dashboard(&self) -> DashboardSummary {
        let today = self.clock.utc().date_naive();
        let state = self.lock();
        DashboardSummary::compute(state.tasks.iter(), &state.projects, today)
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn has_task(&self, task_id: TaskId) -> bool {
        self.lock().tasks.contains(task_id)
    }

    fn has_project(&self, project_id: ProjectId) -> bool {
        self.lock()
            .projects
            .iter()
            .any(|project| project.id() == project_id)
    }

    /// Records `error` as the last failure and hands it back.
    fn fail(&self, state: &mut BoardState, operation: BoardOperation, error: BoardError) -> BoardError {
        warn!(%operation, kind = %error.kind(), %error, "board operation failed");
        state.last_error = Some(BoardFailure {
            operation,
            error: error.clone(),
            occurred_at: self.clock.utc(),
        });
        error
    }

    fn record(&self, operation: BoardOperation, error: BoardError) -> BoardError {
        let mut state = self.lock();
        self.fail(&mut state, operation, error)
    }

    fn finish_load(
        &self,
        tasks: RemoteResult<Vec<Task>>,
        projects: RemoteResult<Vec<Project>>,
    ) -> BoardResult<()> {
        let mut guard = self.lock();
        let state = &mut *guard;
        state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
        let mut failure = None;

        match tasks {
            Ok(tasks) => {
                state.tasks = TaskCollection::from_tasks(tasks);
                state.revisions.clear();
                state.epoch += 1;
                debug!(count = state.tasks.len(), "task collection replaced");
            }
            Err(err) => {
                warn!(error = %err, "task fetch failed, keeping cached tasks");
                failure = Some((BoardOperation::LoadTasks, err));
            }
        }
        match projects {
            Ok(projects) => {
                debug!(count = projects.len(), "project list replaced");
                state.projects = projects;
            }
            Err(err) => {
                warn!(error = %err, "project fetch failed, keeping cached projects");
                failure.get_or_insert((BoardOperation::LoadProjects, err));
            }
        }

        match failure {
            None => {
                state.last_error = None;
                info!(
                    tasks = state.tasks.len(),
                    projects = state.projects.len(),
                    "board loaded"
                );
                Ok(())
            }
            Some((operation, err)) => Err(self.fail(state, operation, err.into())),
        }
    }

    fn reorder_locally(
        &self,
        status: TaskStatus,
        from: usize,
        to: usize,
        task_id: TaskId,
    ) -> DropOutcome {
        let mut state = self.lock();
        let dragged = state.tasks.ids_with_status(status).get(from).copied();
        if dragged != Some(task_id) {
            debug!(%task_id, %status, from, "drop ignored, bucket changed since drag started");
            return DropOutcome::Unchanged;
        }
        if state.tasks.reorder_within(status, from, to) {
            debug!(%task_id, %status, from, to, "task reordered locally");
            DropOutcome::Reordered
        } else {
            DropOutcome::Unchanged
        }
    }

    fn begin_create(&self, new_task: &NewTask) -> BoardResult<DraftId> {
        let mut state = self.lock();
        if let Err(err) = new_task.validate(self.policy.require_project) {
            return Err(self.fail(&mut state, BoardOperation::CreateTask, err.into()));
        }
        let id = DraftId::new();
        state.drafts.push(DraftTask {
            id,
            task: new_task.clone(),
            started_at: self.clock.utc(),
        });
        debug!(draft_id = %id, "task creation started");
        Ok(id)
    }

    fn finish_create(&self, draft_id: DraftId, result: RemoteResult<Task>) -> BoardResult<Task> {
        let mut guard = self.lock();
        let state = &mut *guard;
        state.drafts.retain(|draft| draft.id != draft_id);
        match result {
            Ok(task) => {
                info!(task_id = %task.id(), %draft_id, "task created");
                if state.tasks.upsert(task.clone()).is_none()
                    && let Some(project) = project_mut(&mut state.projects, task.project_id())
                {
                    project.record_task_added();
                }
                Ok(task)
            }
            Err(err) => Err(self.fail(state, BoardOperation::CreateTask, err.into())),
        }
    }

    fn finish_delete(&self, task_id: TaskId, result: RemoteResult<()>) -> BoardResult<DeleteOutcome> {
        let mut guard = self.lock();
        let state = &mut *guard;
        match result {
            Ok(()) => {
                if let Some(removed) = state.tasks.remove(task_id)
                    && let Some(project) = project_mut(&mut state.projects, removed.project_id())
                {
                    project.record_task_removed();
                }
                state.revisions.remove(&task_id);
                info!(%task_id, "task deleted");
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) => Err(self.fail(state, BoardOperation::DeleteTask(task_id), err.into())),
        }
    }
}

fn project_mut(projects: &mut [Project], project_id: Option<ProjectId>) -> Option<&mut Project> {
    let id = project_id?;
    projects.iter_mut().find(|project| project.id() == id)
}
