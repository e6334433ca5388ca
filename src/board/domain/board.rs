//! Kanban view derived from the task collection.

use super::{Task, TaskCollection, TaskId, TaskStatus};

/// Tasks grouped into one ordered bucket per status.
///
/// The buckets partition the collection the board was built from: every
/// task appears in exactly one bucket, the one matching its status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    todo: Vec<Task>,
    in_progress: Vec<Task>,
    completed: Vec<Task>,
}

impl Board {
    /// Groups the collection by status, preserving display order.
    #[must_use]
    pub fn from_collection(collection: &TaskCollection) -> Self {
        let mut board = Self::default();
        for task in collection.iter() {
            board.bucket_mut(task.status()).push(task.clone());
        }
        board
    }

    /// Returns the bucket for `status`.
    #[must_use]
    pub fn bucket(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
        }
    }

    /// Iterates over the buckets in column order.
    pub fn buckets(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.bucket(status)))
    }

    /// Returns the identifiers in the bucket for `status`.
    #[must_use]
    pub fn bucket_ids(&self, status: TaskStatus) -> Vec<TaskId> {
        self.bucket(status).iter().map(Task::id).collect()
    }

    /// Returns the bucket and index of a task.
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<(TaskStatus, usize)> {
        self.buckets().find_map(|(status, tasks)| {
            tasks
                .iter()
                .position(|task| task.id() == id)
                .map(|index| (status, index))
        })
    }

    /// Returns the total number of tasks across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.completed.len()
    }

    /// Returns `true` when every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    const fn bucket_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Completed => &mut self.completed,
        }
    }
}
