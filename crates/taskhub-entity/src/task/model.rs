//! Task entity model and read model.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::types::{ProjectId, TaskId, TenantId, UserId};

use super::priority::TaskPriority;
use super::status::TaskStatus;

/// A task inside a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Owning tenant, always the parent project's tenant.
    pub tenant_id: TenantId,
    /// Parent project.
    pub project_id: ProjectId,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Assignee; must be a member of `tenant_id`.
    pub assigned_to: Option<UserId>,
    /// Priority.
    pub priority: TaskPriority,
    /// Progress status.
    pub status: TaskStatus,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Listing order: priority descending, then due date ascending with
    /// undated tasks last.
    pub fn list_order(a: &Task, b: &Task) -> Ordering {
        b.priority.cmp(&a.priority).then_with(|| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
    }
}

/// Data required to create a task.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub tenant_id: TenantId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<UserId>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
}

/// Full update of a task's editable fields.
///
/// The outer `Option` of `assigned_to` and `due_date` means "leave as is";
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<Option<UserId>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl UpdateTask {
    /// Apply the changes onto `task`.
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = Some(description);
        }
        if let Some(assigned_to) = self.assigned_to {
            task.assigned_to = assigned_to;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

/// Public view of an assignee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeInfo {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
}

/// A task with its assignee resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub assignee: Option<AssigneeInfo>,
}
