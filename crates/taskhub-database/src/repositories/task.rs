//! Task persistence.

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, ProjectId, TaskId, UserId};
use taskhub_entity::task::{CreateTask, Task, TaskPriority, TaskStatus, TaskView};

/// Filters for the task list of one project.
#[derive(Debug, Clone)]
pub struct TaskFilter {
    pub project_id: ProjectId,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<UserId>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
}

impl TaskFilter {
    pub fn for_project(project_id: ProjectId) -> Self {
        Self {
            project_id,
            status: None,
            priority: None,
            assigned_to: None,
            search: None,
        }
    }
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_by_id(&self, id: TaskId) -> AppResult<Option<Task>>;

    async fn create(&self, data: CreateTask) -> AppResult<Task>;

    /// Persist every editable field of `task` and bump `updated_at`.
    async fn update(&self, task: &Task) -> AppResult<Task>;

    async fn delete(&self, id: TaskId) -> AppResult<bool>;

    /// Page through a project's tasks: priority descending, then due date
    /// ascending with undated tasks last.
    async fn list(&self, filter: &TaskFilter, page: PageRequest)
    -> AppResult<PageResponse<TaskView>>;

    /// Every task of a project, in list order.
    async fn list_by_project(&self, project_id: ProjectId) -> AppResult<Vec<TaskView>>;
}
