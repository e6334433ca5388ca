//! Dashboard summary derived from the cached tasks and projects.

use super::{Project, Task, TaskStatus};
use chrono::NaiveDate;

/// Number of recent tasks and projects listed on the dashboard.
pub const RECENT_LIMIT: usize = 5;

/// Headline counts and recent items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Total number of tasks.
    pub total_tasks: usize,
    /// Total number of projects.
    pub total_projects: usize,
    /// Tasks still to do.
    pub todo: usize,
    /// Tasks in progress.
    pub in_progress: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Tasks due before today that are not completed.
    pub overdue: usize,
    /// The first tasks in store order.
    pub recent_tasks: Vec<Task>,
    /// The first projects in store order.
    pub recent_projects: Vec<Project>,
}

impl DashboardSummary {
    /// Summarises tasks and projects as of `today`.
    pub fn compute<'a>(
        tasks: impl IntoIterator<Item = &'a Task>,
        projects: &[Project],
        today: NaiveDate,
    ) -> Self {
        let mut summary = Self {
            total_tasks: 0,
            total_projects: projects.len(),
            todo: 0,
            in_progress: 0,
            completed: 0,
            overdue: 0,
            recent_tasks: Vec::new(),
            recent_projects: projects.iter().take(RECENT_LIMIT).cloned().collect(),
        };

        for task in tasks {
            summary.total_tasks += 1;
            match task.status() {
                TaskStatus::Todo => summary.todo += 1,
                TaskStatus::InProgress => summary.in_progress += 1,
                TaskStatus::Completed => summary.completed += 1,
            }
            if task.is_overdue(today) {
                summary.overdue += 1;
            }
            if summary.recent_tasks.len() < RECENT_LIMIT {
                summary.recent_tasks.push(task.clone());
            }
        }
        summary
    }
}
