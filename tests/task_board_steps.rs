//! Behaviour tests for the optimistic task board.

#[path = "task_board_steps/mod.rs"]
mod task_board_steps_defs;

use rstest_bdd_macros::scenario;
use task_board_steps_defs::world::{TaskBoardWorld, world};

#[scenario(
    path = "tests/features/task_board.feature",
    name = "Moving a task persists only its status"
)]
#[tokio::test(flavor = "multi_thread")]
async fn moving_a_task_persists_only_its_status(world: TaskBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_board.feature",
    name = "Moving a task to its current status is skipped"
)]
#[tokio::test(flavor = "multi_thread")]
async fn moving_to_current_status_is_skipped(world: TaskBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_board.feature",
    name = "Moving an unknown task is skipped"
)]
#[tokio::test(flavor = "multi_thread")]
async fn moving_unknown_task_is_skipped(world: TaskBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_board.feature",
    name = "A rejected move is reverted"
)]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_is_reverted(world: TaskBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_board.feature",
    name = "A late failure does not undo a newer move"
)]
#[tokio::test(flavor = "multi_thread")]
async fn late_failure_does_not_undo_newer_move(world: TaskBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_board.feature",
    name = "A blank title never reaches the store"
)]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_never_reaches_store(world: TaskBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_board.feature",
    name = "A failed delete keeps the task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn failed_delete_keeps_task(world: TaskBoardWorld) {
    let _ = world;
}
