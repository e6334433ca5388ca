//! Wire models for task and project payloads.
//!
//! The store emits dates either as `YYYY-MM-DD` or as naive ISO datetimes
//! (`YYYY-MM-DDTHH:MM:SS[.ffffff]`); the client always sends `YYYY-MM-DD`.

use crate::board::domain::{
    NewProject, NewTask, Priority, Project, ProjectId, ProjectRecord, Task, TaskId, TaskPatch,
    TaskRecord, TaskStatus,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a store date, accepting a plain date, a naive datetime, or an
/// RFC 3339 timestamp.
#[must_use]
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, WIRE_DATE_FORMAT)
        .ok()
        .or_else(|| parse_wire_datetime(trimmed).map(|datetime| datetime.date()))
}

/// Parses a store timestamp, accepting a naive datetime or an RFC 3339
/// timestamp.
#[must_use]
pub fn parse_wire_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|datetime| datetime.naive_utc())
        })
}

/// Formats a date the way the store expects it.
#[must_use]
pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_wire_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'"))),
    }
}

fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_wire_datetime(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'"))),
    }
}

/// Task as returned by the store.
#[derive(Debug, Deserialize)]
pub(super) struct TaskPayload {
    id: u64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    status: TaskStatus,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    assigned_to: Option<String>,
    #[serde(default)]
    project_id: Option<u64>,
}

impl From<TaskPayload> for Task {
    fn from(payload: TaskPayload) -> Self {
        Self::from_record(TaskRecord {
            id: TaskId::new(payload.id),
            title: payload.title,
            description: payload.description.unwrap_or_default(),
            status: payload.status,
            priority: payload.priority.unwrap_or_default(),
            due_date: payload.due_date,
            project_id: payload.project_id.map(ProjectId::new),
            assignee: payload.assigned_to,
        })
    }
}

/// Decodes a task listing record by record.
///
/// A record the client cannot represent, such as one carrying a status
/// outside the board's buckets, is logged and dropped so the rest of the
/// listing still loads.
pub(super) fn decode_task_list(records: Vec<Value>) -> Vec<TaskPayload> {
    records
        .into_iter()
        .filter_map(|record| {
            let task_id = record.get("id").cloned();
            match serde_json::from_value::<TaskPayload>(record) {
                Ok(payload) => Some(payload),
                Err(err) => {
                    warn!(task_id = ?task_id, error = %err, "skipping undecodable task record");
                    None
                }
            }
        })
        .collect()
}

/// Project as returned by the store.
#[derive(Debug, Deserialize)]
pub(super) struct ProjectPayload {
    id: u64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    deadline: Option<NaiveDate>,
    #[serde(default)]
    creator: Option<String>,
    #[serde(default)]
    task_count: usize,
}

impl From<ProjectPayload> for Project {
    fn from(payload: ProjectPayload) -> Self {
        Self::from_record(ProjectRecord {
            id: ProjectId::new(payload.id),
            name: payload.name,
            description: payload.description.unwrap_or_default(),
            deadline: payload.deadline,
            task_count: payload.task_count,
            created_at: payload.created_at,
            creator: payload.creator,
        })
    }
}

/// Body of `POST /api/tasks/`.
#[derive(Debug, Serialize)]
pub(super) struct NewTaskPayload<'a> {
    title: &'a str,
    description: &'a str,
    status: TaskStatus,
    priority: Priority,
    due_date: Option<String>,
    project_id: Option<u64>,
}

impl<'a> From<&'a NewTask> for NewTaskPayload<'a> {
    fn from(task: &'a NewTask) -> Self {
        Self {
            title: task.title(),
            description: task.description(),
            status: task.status(),
            priority: task.priority(),
            due_date: task.due_date().map(format_wire_date),
            project_id: task.project_id().map(ProjectId::value),
        }
    }
}

/// Body of `PUT /api/tasks/{id}`; unset fields are omitted.
#[derive(Debug, Serialize)]
pub(super) struct TaskPatchPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<Option<String>>,
}

impl<'a> From<&'a TaskPatch> for TaskPatchPayload<'a> {
    fn from(patch: &'a TaskPatch) -> Self {
        Self {
            title: patch.title.as_deref(),
            description: patch.description.as_deref(),
            status: patch.status,
            priority: patch.priority,
            due_date: patch.due_date.map(|date| date.map(format_wire_date)),
        }
    }
}

/// Body of `POST /api/projects/`.
#[derive(Debug, Serialize)]
pub(super) struct NewProjectPayload<'a> {
    name: &'a str,
    description: &'a str,
    deadline: Option<String>,
}

impl<'a> From<&'a NewProject> for NewProjectPayload<'a> {
    fn from(project: &'a NewProject) -> Self {
        Self {
            name: project.name(),
            description: project.description(),
            deadline: project.deadline().map(format_wire_date),
        }
    }
}
