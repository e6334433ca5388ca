//! Month calendar view over task due dates.

use super::{Priority, Project, ProjectId, Task, TaskId, TaskStatus};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// A task placed on its due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    /// Task identifier.
    pub task_id: TaskId,
    /// Due date the task is placed on.
    pub date: NaiveDate,
    /// Task title.
    pub title: String,
    /// Task status.
    pub status: TaskStatus,
    /// Task priority.
    pub priority: Priority,
    /// Name of the owning project, when it is known.
    pub project_name: Option<String>,
}

/// Tasks due within one calendar month, sorted by date then title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    year: i32,
    month: u32,
    entries: Vec<CalendarEntry>,
}

impl CalendarView {
    /// Builds the view for `year`/`month`; tasks without a due date or due in
    /// another month are left out.
    pub fn for_month<'a>(
        tasks: impl IntoIterator<Item = &'a Task>,
        projects: &[Project],
        year: i32,
        month: u32,
    ) -> Self {
        let names: HashMap<ProjectId, &str> = projects
            .iter()
            .map(|project| (project.id(), project.name()))
            .collect();

        let mut entries: Vec<CalendarEntry> = tasks
            .into_iter()
            .filter_map(|task| {
                let date = task.due_date()?;
                (date.year() == year && date.month() == month).then(|| CalendarEntry {
                    task_id: task.id(),
                    date,
                    title: task.title().to_owned(),
                    status: task.status(),
                    priority: task.priority(),
                    project_name: task
                        .project_id()
                        .and_then(|id| names.get(&id))
                        .map(|name| (*name).to_owned()),
                })
            })
            .collect();
        entries.sort_by(|left, right| {
            left.date
                .cmp(&right.date)
                .then_with(|| left.title.cmp(&right.title))
        });

        Self {
            year,
            month,
            entries,
        }
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the calendar month (1-12).
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns every entry in the month.
    #[must_use]
    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    /// Returns the entries due on `date`.
    pub fn on(&self, date: NaiveDate) -> impl Iterator<Item = &CalendarEntry> {
        self.entries.iter().filter(move |entry| entry.date == date)
    }
}
