//! Then steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status};
use rstest_bdd_macros::then;
use taskboard::board::{
    adapters::memory::{StoreCall, StoreOperation},
    domain::TaskId,
};

fn parse_ids(raw: &str) -> Result<Vec<TaskId>, eyre::Report> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<u64>()
                .map(TaskId::new)
                .map_err(|err| eyre::eyre!("invalid task id '{part}': {err}"))
        })
        .collect()
}

#[then("the store received {count:usize} status update for task {id:u64}")]
fn status_updates_received(
    world: &TaskBoardWorld,
    count: usize,
    id: u64,
) -> Result<(), eyre::Report> {
    let received = world
        .store
        .calls_for(StoreOperation::UpdateTask)
        .into_iter()
        .filter(|call| {
            matches!(call, StoreCall::UpdateTask { id: target, patch }
                if *target == TaskId::new(id)
                    && patch.status.is_some()
                    && patch.title.is_none()
                    && patch.description.is_none())
        })
        .count();
    if received != count {
        return Err(eyre::eyre!(
            "expected {count} status updates for task {id}, found {received}"
        ));
    }
    Ok(())
}

#[then(r#"the "{status}" bucket is empty"#)]
fn bucket_is_empty(world: &TaskBoardWorld, status: String) -> Result<(), eyre::Report> {
    let bucket = world.controller()?.board().bucket_ids(parse_status(&status)?);
    if !bucket.is_empty() {
        return Err(eyre::eyre!("expected empty {status} bucket, found {bucket:?}"));
    }
    Ok(())
}

#[then(r#"the "{status}" bucket holds tasks "{ids}""#)]
fn bucket_holds(world: &TaskBoardWorld, status: String, ids: String) -> Result<(), eyre::Report> {
    let expected = parse_ids(&ids)?;
    let bucket = world.controller()?.board().bucket_ids(parse_status(&status)?);
    if bucket != expected {
        return Err(eyre::eyre!(
            "expected {status} bucket {expected:?}, found {bucket:?}"
        ));
    }
    Ok(())
}

#[then(r#"task {id:u64} has status "{status}""#)]
fn task_has_status(world: &TaskBoardWorld, id: u64, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let actual = world
        .controller()?
        .task(TaskId::new(id))
        .map(|task| task.status())
        .ok_or_else(|| eyre::eyre!("task {id} is not on the board"))?;
    if actual != expected {
        return Err(eyre::eyre!("expected task {id} in {expected}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the last error is a "{kind}" failure"#)]
fn last_error_kind(world: &TaskBoardWorld, kind: String) -> Result<(), eyre::Report> {
    let failure = world
        .controller()?
        .last_error()
        .ok_or_else(|| eyre::eyre!("no error was recorded"))?;
    let actual = failure.kind().to_string();
    if actual != kind {
        return Err(eyre::eyre!("expected a {kind} failure, found {actual}"));
    }
    Ok(())
}

#[then("the store received no task creation")]
fn no_task_creation(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let calls = world.store.calls_for(StoreOperation::CreateTask);
    if !calls.is_empty() {
        return Err(eyre::eyre!("expected no create calls, found {calls:?}"));
    }
    Ok(())
}
