//! Given steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use std::sync::Arc;
use taskboard::board::{
    adapters::memory::{InMemoryTaskStore, StoreOperation},
    domain::{Priority, Project, ProjectId, ProjectRecord, Task, TaskId, TaskRecord},
    services::TaskBoardController,
};
use taskboard::remote::RemoteError;

#[given(r#"project {id:u64} named "{name}" exists in the store"#)]
fn project_exists(world: &mut TaskBoardWorld, id: u64, name: String) {
    world.seed_projects.push(Project::from_record(ProjectRecord {
        id: ProjectId::new(id),
        name,
        description: String::new(),
        deadline: None,
        task_count: 0,
        created_at: None,
        creator: None,
    }));
}

#[given(r#"the store holds task {id:u64} "{title}" in "{status}""#)]
fn store_holds_task(
    world: &mut TaskBoardWorld,
    id: u64,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    world.seed_tasks.push(Task::from_record(TaskRecord {
        id: TaskId::new(id),
        title,
        description: String::new(),
        status: parse_status(&status)?,
        priority: Priority::Medium,
        due_date: None,
        project_id: world.seed_projects.first().map(Project::id),
        assignee: None,
    }));
    Ok(())
}

#[given("the board has been loaded")]
fn board_loaded(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    let store = Arc::new(
        InMemoryTaskStore::new()
            .with_projects(world.seed_projects.drain(..))
            .with_tasks(world.seed_tasks.drain(..)),
    );
    let controller = TaskBoardController::new(Arc::clone(&store), Arc::new(DefaultClock));
    run_async(controller.load()).wrap_err("load board for scenario")?;
    world.store = store;
    world.controller = Some(controller);
    Ok(())
}

#[given("the store will reject the next status update")]
fn reject_next_update(world: &mut TaskBoardWorld) {
    world.store.fail_next(
        StoreOperation::UpdateTask,
        RemoteError::Rejected {
            status: 500,
            message: "An error occurred".to_owned(),
        },
    );
}

#[given("the store will reject the next delete")]
fn reject_next_delete(world: &mut TaskBoardWorld) {
    world.store.fail_next(
        StoreOperation::DeleteTask,
        RemoteError::NotFound("Task not found".to_owned()),
    );
}
