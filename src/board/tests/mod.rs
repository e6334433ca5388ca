//! Unit tests for the task board.

mod domain_tests;

use crate::board::domain::{
    Priority, Project, ProjectId, ProjectRecord, Task, TaskId, TaskRecord, TaskStatus,
};
use chrono::NaiveDate;

pub(super) fn task(id: u64, status: TaskStatus) -> Task {
    Task::from_record(TaskRecord {
        id: TaskId::new(id),
        title: format!("Task {id}"),
        description: String::new(),
        status,
        priority: Priority::Medium,
        due_date: None,
        project_id: None,
        assignee: None,
    })
}

pub(super) fn dated_task(id: u64, title: &str, due: NaiveDate, project: Option<u64>) -> Task {
    Task::from_record(TaskRecord {
        id: TaskId::new(id),
        title: title.to_owned(),
        description: String::new(),
        status: TaskStatus::Todo,
        priority: Priority::High,
        due_date: Some(due),
        project_id: project.map(ProjectId::new),
        assignee: None,
    })
}

pub(super) fn project(id: u64, name: &str) -> Project {
    Project::from_record(ProjectRecord {
        id: ProjectId::new(id),
        name: name.to_owned(),
        description: String::new(),
        deadline: None,
        task_count: 0,
        created_at: None,
        creator: None,
    })
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}
