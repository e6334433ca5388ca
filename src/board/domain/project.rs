//! Project record and creation payload.

use super::{BoardDomainError, ProjectId};
use chrono::{NaiveDate, NaiveDateTime};

/// A project as held in the client-side cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    deadline: Option<NaiveDate>,
    task_count: usize,
    created_at: Option<NaiveDateTime>,
    creator: Option<String>,
}

/// Parameter object for reconstructing a project returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    /// Store-assigned identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Optional deadline.
    pub deadline: Option<NaiveDate>,
    /// Number of tasks the store counts against the project.
    pub task_count: usize,
    /// Creation timestamp reported by the store.
    pub created_at: Option<NaiveDateTime>,
    /// Username of the creator.
    pub creator: Option<String>,
}

impl Project {
    /// Reconstructs a project from store data.
    #[must_use]
    pub fn from_record(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            deadline: record.deadline,
            task_count: record.task_count,
            created_at: record.created_at,
            creator: record.creator,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Returns the number of tasks counted against the project.
    ///
    /// Starts from the store's figure and follows creates and deletes made
    /// through the board until the next reload.
    #[must_use]
    pub const fn task_count(&self) -> usize {
        self.task_count
    }

    pub(crate) const fn record_task_added(&mut self) {
        self.task_count += 1;
    }

    pub(crate) const fn record_task_removed(&mut self) {
        self.task_count = self.task_count.saturating_sub(1);
    }

    /// Returns the creation timestamp, if reported.
    #[must_use]
    pub const fn created_at(&self) -> Option<NaiveDateTime> {
        self.created_at
    }

    /// Returns the creator's username, if reported.
    #[must_use]
    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }
}

/// Fields supplied when creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    name: String,
    description: String,
    deadline: Option<NaiveDate>,
}

impl NewProject {
    /// Creates a request with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            deadline: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Checks that the name is not blank.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyProjectName`] for a blank name.
    pub fn validate(&self) -> Result<(), BoardDomainError> {
        if self.name.trim().is_empty() {
            return Err(BoardDomainError::EmptyProjectName);
        }
        Ok(())
    }
}
