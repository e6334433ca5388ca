//! Shared world state for task board BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemoryTaskStore,
    domain::{Project, Task, TaskId, TaskStatus},
    services::{PendingMove, TaskBoardController},
};

/// Controller type used by the BDD world.
pub type TestController = TaskBoardController<InMemoryTaskStore, DefaultClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub store: Arc<InMemoryTaskStore>,
    pub seed_tasks: Vec<Task>,
    pub seed_projects: Vec<Project>,
    pub controller: Option<TestController>,
    pub pending: HashMap<TaskId, Vec<PendingMove>>,
}

impl TaskBoardWorld {
    /// Creates a world with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryTaskStore::new()),
            seed_tasks: Vec::new(),
            seed_projects: Vec::new(),
            controller: None,
            pending: HashMap::new(),
        }
    }

    /// Returns the controller created by the load step.
    pub fn controller(&self) -> Result<&TestController, eyre::Report> {
        self.controller
            .as_ref()
            .ok_or_else(|| eyre::eyre!("board has not been loaded in this scenario"))
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Parses a status name used in scenario text.
pub fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    raw.parse()
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
