//! Identifier-indexed task cache with a stable display order.

use super::{ProjectId, Task, TaskId, TaskStatus};
use std::collections::HashMap;

/// The controller's task cache.
///
/// Identifiers are unique; inserting a task whose identifier is already
/// present replaces the record in place. `order` holds every identifier
/// exactly once and determines the order of tasks within each board bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCollection {
    tasks: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
}

impl TaskCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection in store order.
    ///
    /// A repeated identifier keeps its first position and its last record.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut collection = Self::new();
        for task in tasks {
            collection.upsert(task);
        }
        collection
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when the collection holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` when a task with `id` is present.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Returns the task with `id`, if present.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(&id)
    }

    /// Inserts or replaces a task, returning the replaced record.
    pub fn upsert(&mut self, task: Task) -> Option<Task> {
        let id = task.id();
        let previous = self.tasks.insert(id, task);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Removes a task, returning it when it was present.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let removed = self.tasks.remove(&id)?;
        self.order.retain(|candidate| *candidate != id);
        Some(removed)
    }

    /// Removes every task belonging to `project_id`, returning how many were
    /// removed.
    pub fn remove_project(&mut self, project_id: ProjectId) -> usize {
        let doomed: Vec<TaskId> = self
            .iter()
            .filter(|task| task.project_id() == Some(project_id))
            .map(Task::id)
            .collect();
        for id in &doomed {
            self.remove(*id);
        }
        doomed.len()
    }

    /// Iterates over tasks in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|id| self.tasks.get(id))
    }

    /// Returns the identifiers with `status`, in display order.
    #[must_use]
    pub fn ids_with_status(&self, status: TaskStatus) -> Vec<TaskId> {
        self.iter()
            .filter(|task| task.status() == status)
            .map(Task::id)
            .collect()
    }

    /// Moves the task at `from` to `to` among the tasks with `status`.
    ///
    /// Tasks in other buckets keep their positions. `to` is clamped to the
    /// bucket length. Returns `false` when nothing moved.
    pub fn reorder_within(&mut self, status: TaskStatus, from: usize, to: usize) -> bool {
        let slots: Vec<usize> = self
            .order
            .iter()
            .enumerate()
            .filter(|(_, id)| self.tasks.get(id).is_some_and(|task| task.status() == status))
            .map(|(slot, _)| slot)
            .collect();
        let mut members: Vec<TaskId> = slots
            .iter()
            .filter_map(|slot| self.order.get(*slot).copied())
            .collect();

        if from >= members.len() {
            return false;
        }
        let target = to.min(members.len().saturating_sub(1));
        if from == target {
            return false;
        }

        let moved = members.remove(from);
        members.insert(target, moved);
        for (slot, id) in slots.into_iter().zip(members) {
            if let Some(entry) = self.order.get_mut(slot) {
                *entry = id;
            }
        }
        true
    }
}
