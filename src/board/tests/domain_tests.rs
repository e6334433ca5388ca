//! Unit tests for board domain types and derived views.

use super::{date, dated_task, project, task};
use crate::board::domain::{
    Board, BoardDomainError, CalendarView, DashboardSummary, NewProject, NewTask, Priority,
    ProjectId, TaskCollection, TaskId, TaskPatch, TaskStatus,
};
use rstest::rstest;

fn ids(values: &[u64]) -> Vec<TaskId> {
    values.iter().copied().map(TaskId::new).collect()
}

#[rstest]
#[case("todo", TaskStatus::Todo)]
#[case("in_progress", TaskStatus::InProgress)]
#[case("completed", TaskStatus::Completed)]
fn task_status_parses_wire_names(#[case] wire: &str, #[case] expected: TaskStatus) {
    let parsed: TaskStatus = wire.parse().expect("known status");
    assert_eq!(parsed, expected);
    assert_eq!(parsed.as_str(), wire);
}

#[rstest]
fn unknown_task_status_is_rejected() {
    let result = "blocked".parse::<TaskStatus>();
    assert_eq!(result.map_err(|err| err.0), Err("blocked".to_owned()));
}

#[rstest]
#[case("low", Priority::Low)]
#[case("medium", Priority::Medium)]
#[case("high", Priority::High)]
fn priority_parses_wire_names(#[case] wire: &str, #[case] expected: Priority) {
    assert_eq!(wire.parse::<Priority>().ok(), Some(expected));
}

#[rstest]
fn board_partitions_every_task_exactly_once() {
    let collection = TaskCollection::from_tasks([
        task(1, TaskStatus::Todo),
        task(2, TaskStatus::Completed),
        task(3, TaskStatus::InProgress),
        task(4, TaskStatus::Todo),
    ]);

    let board = Board::from_collection(&collection);

    assert_eq!(board.bucket_ids(TaskStatus::Todo), ids(&[1, 4]));
    assert_eq!(board.bucket_ids(TaskStatus::InProgress), ids(&[3]));
    assert_eq!(board.bucket_ids(TaskStatus::Completed), ids(&[2]));
    assert_eq!(board.len(), collection.len());
    assert_eq!(
        board.position(TaskId::new(4)),
        Some((TaskStatus::Todo, 1))
    );
}

#[rstest]
fn upsert_replaces_in_place() {
    let mut collection =
        TaskCollection::from_tasks([task(1, TaskStatus::Todo), task(2, TaskStatus::Todo)]);

    let replaced = collection.upsert(task(1, TaskStatus::Completed));

    assert!(replaced.is_some());
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.ids_with_status(TaskStatus::Todo), ids(&[2]));
    assert_eq!(
        collection.iter().map(|item| item.id()).collect::<Vec<_>>(),
        ids(&[1, 2])
    );
}

#[rstest]
#[case(0, 2, &[2, 4, 1], true)]
#[case(2, 0, &[4, 1, 2], true)]
#[case(0, 9, &[2, 4, 1], true)]
#[case(1, 1, &[1, 2, 4], false)]
#[case(5, 0, &[1, 2, 4], false)]
fn reorder_within_moves_only_the_bucket(
    #[case] from: usize,
    #[case] to: usize,
    #[case] expected: &[u64],
    #[case] moved: bool,
) {
    let mut collection = TaskCollection::from_tasks([
        task(1, TaskStatus::Todo),
        task(2, TaskStatus::Todo),
        task(3, TaskStatus::Completed),
        task(4, TaskStatus::Todo),
    ]);

    assert_eq!(collection.reorder_within(TaskStatus::Todo, from, to), moved);
    assert_eq!(collection.ids_with_status(TaskStatus::Todo), ids(expected));
    assert_eq!(
        collection.ids_with_status(TaskStatus::Completed),
        ids(&[3])
    );
}

#[rstest]
fn remove_project_drops_only_its_tasks() {
    let due = date(2026, 3, 1);
    let mut collection = TaskCollection::from_tasks([
        dated_task(1, "a", due, Some(7)),
        dated_task(2, "b", due, Some(8)),
        dated_task(3, "c", due, Some(7)),
    ]);

    assert_eq!(collection.remove_project(ProjectId::new(7)), 2);
    assert_eq!(collection.len(), 1);
    assert!(collection.contains(TaskId::new(2)));
}

#[rstest]
fn calendar_lists_month_entries_by_date_then_title() {
    let tasks = [
        dated_task(1, "Write report", date(2026, 5, 20), Some(1)),
        dated_task(2, "Book venue", date(2026, 5, 3), None),
        dated_task(3, "Archive", date(2026, 5, 20), Some(1)),
        dated_task(4, "Next month", date(2026, 6, 1), None),
        task(5, TaskStatus::Todo),
    ];
    let projects = [project(1, "Launch")];

    let view = CalendarView::for_month(tasks.iter(), &projects, 2026, 5);

    let titles: Vec<&str> = view.entries().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Book venue", "Archive", "Write report"]);
    assert_eq!(view.on(date(2026, 5, 20)).count(), 2);
    let launch = view
        .entries()
        .iter()
        .find(|entry| entry.task_id == TaskId::new(1))
        .and_then(|entry| entry.project_name.as_deref());
    assert_eq!(launch, Some("Launch"));
}

#[rstest]
fn dashboard_counts_statuses_and_overdue_tasks() {
    let today = date(2026, 4, 10);
    let mut late = dated_task(1, "late", date(2026, 4, 1), None);
    let mut done_late = dated_task(2, "done late", date(2026, 4, 1), None);
    done_late.apply(&TaskPatch::status(TaskStatus::Completed));
    late.apply(&TaskPatch::status(TaskStatus::InProgress));
    let tasks = [
        late,
        done_late,
        dated_task(3, "future", date(2026, 5, 1), None),
        task(4, TaskStatus::Todo),
        task(5, TaskStatus::Todo),
        task(6, TaskStatus::Todo),
    ];
    let projects = [project(1, "Alpha"), project(2, "Beta")];

    let summary = DashboardSummary::compute(tasks.iter(), &projects, today);

    assert_eq!(summary.total_tasks, 6);
    assert_eq!(summary.total_projects, 2);
    assert_eq!(
        (summary.todo, summary.in_progress, summary.completed),
        (4, 1, 1)
    );
    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.recent_tasks.len(), 5);
}

#[rstest]
#[case(NewTask::new("   "), true, Err(BoardDomainError::EmptyTitle))]
#[case(NewTask::new("Plan"), true, Err(BoardDomainError::MissingProject))]
#[case(NewTask::new("Plan"), false, Ok(()))]
#[case(NewTask::new("Plan").with_project(ProjectId::new(1)), true, Ok(()))]
fn new_task_validation(
    #[case] new_task: NewTask,
    #[case] require_project: bool,
    #[case] expected: Result<(), BoardDomainError>,
) {
    assert_eq!(new_task.validate(require_project), expected);
}

#[rstest]
fn blank_project_name_is_rejected() {
    assert_eq!(
        NewProject::new("").validate(),
        Err(BoardDomainError::EmptyProjectName)
    );
}

#[rstest]
fn patch_applies_only_set_fields() {
    let mut subject = dated_task(1, "Original", date(2026, 1, 2), None);
    let patch = TaskPatch {
        title: Some("Renamed".to_owned()),
        due_date: Some(None),
        ..TaskPatch::default()
    };

    subject.apply(&patch);

    assert_eq!(subject.title(), "Renamed");
    assert_eq!(subject.due_date(), None);
    assert_eq!(subject.priority(), Priority::High);
    assert!(!patch.is_empty());
    assert!(TaskPatch::default().is_empty());
}
