//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status, run_async};
use rstest_bdd_macros::when;
use taskboard::board::domain::{NewTask, ProjectId, TaskId};
use taskboard::remote::RemoteError;

#[when(r#"task {id:u64} is moved to "{status}""#)]
fn move_task(world: &mut TaskBoardWorld, id: u64, status: String) -> Result<(), eyre::Report> {
    let target = parse_status(&status)?;
    // Failures are recorded on the controller and checked by later steps.
    let _outcome = run_async(world.controller()?.move_task(TaskId::new(id), target));
    Ok(())
}

#[when(r#"task {id:u64} is moved to "{status}" without waiting"#)]
fn begin_move(world: &mut TaskBoardWorld, id: u64, status: String) -> Result<(), eyre::Report> {
    let target = parse_status(&status)?;
    let task_id = TaskId::new(id);
    let pending = world
        .controller()?
        .begin_move(task_id, target)
        .ok_or_else(|| eyre::eyre!("move of task {id} to {status} was skipped"))?;
    world.pending.entry(task_id).or_default().push(pending);
    Ok(())
}

#[when("the newer move of task {id:u64} is confirmed")]
fn confirm_newer(world: &mut TaskBoardWorld, id: u64) -> Result<(), eyre::Report> {
    let pending = world
        .pending
        .get_mut(&TaskId::new(id))
        .and_then(Vec::pop)
        .ok_or_else(|| eyre::eyre!("no pending move for task {id}"))?;
    world
        .controller()?
        .settle_move(pending, Ok(()))
        .map_err(|err| eyre::eyre!("confirmation failed: {err}"))?;
    Ok(())
}

#[when("the older move of task {id:u64} fails")]
fn fail_older(world: &mut TaskBoardWorld, id: u64) -> Result<(), eyre::Report> {
    let pending = world
        .pending
        .get_mut(&TaskId::new(id))
        .and_then(Vec::pop)
        .ok_or_else(|| eyre::eyre!("no pending move for task {id}"))?;
    let result = world.controller()?.settle_move(
        pending,
        Err(RemoteError::Rejected {
            status: 500,
            message: "An error occurred".to_owned(),
        }),
    );
    if result.is_ok() {
        return Err(eyre::eyre!("a rejected move should surface its error"));
    }
    Ok(())
}

#[when("a task with a blank title is created in project {project:u64}")]
fn create_blank_task(world: &mut TaskBoardWorld, project: u64) -> Result<(), eyre::Report> {
    let new_task = NewTask::new(" ").with_project(ProjectId::new(project));
    let _result = run_async(world.controller()?.create_task(new_task));
    Ok(())
}

#[when("task {id:u64} is deleted")]
fn delete_task(world: &mut TaskBoardWorld, id: u64) -> Result<(), eyre::Report> {
    let _outcome = run_async(world.controller()?.delete_task(TaskId::new(id)));
    Ok(())
}
