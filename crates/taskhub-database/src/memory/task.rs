use async_trait::async_trait;
use chrono::Utc;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, ProjectId, TaskId};
use taskhub_entity::task::{AssigneeInfo, CreateTask, Task, TaskView};

use super::{MemoryState, MemoryStore, matches_search, paginate};
use crate::repositories::{TaskFilter, TaskRepository};

impl MemoryState {
    fn task_view(&self, task: &Task) -> TaskView {
        let assignee = task
            .assigned_to
            .and_then(|id| self.users.get(&id))
            .map(|u| AssigneeInfo {
                id: u.id,
                full_name: u.full_name.clone(),
                email: u.email.clone(),
            });
        TaskView {
            task: task.clone(),
            assignee,
        }
    }

    fn sorted_views<'a>(&self, tasks: impl Iterator<Item = &'a Task>) -> Vec<TaskView> {
        let mut tasks: Vec<&Task> = tasks.collect();
        tasks.sort_by(|a, b| {
            Task::list_order(a, b)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        tasks.into_iter().map(|t| self.task_view(t)).collect()
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn find_by_id(&self, id: TaskId) -> AppResult<Option<Task>> {
        Ok(self.state.read().await.tasks.get(&id).cloned())
    }

    async fn create(&self, data: CreateTask) -> AppResult<Task> {
        let mut state = self.state.write().await;
        if !state.projects.contains_key(&data.project_id) {
            return Err(AppError::database("Project does not exist"));
        }

        let now = Utc::now();
        let task = Task {
            id: TaskId::new(),
            tenant_id: data.tenant_id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            assigned_to: data.assigned_to,
            priority: data.priority,
            status: data.status,
            due_date: data.due_date,
            created_at: now,
            updated_at: now,
        };
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: &Task) -> AppResult<Task> {
        let mut state = self.state.write().await;
        let stored = state
            .tasks
            .get_mut(&task.id)
            .ok_or_else(|| AppError::not_found("Task not found"))?;

        stored.title = task.title.clone();
        stored.description = task.description.clone();
        stored.assigned_to = task.assigned_to;
        stored.priority = task.priority;
        stored.status = task.status;
        stored.due_date = task.due_date;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: TaskId) -> AppResult<bool> {
        Ok(self.state.write().await.tasks.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<TaskView>> {
        let state = self.state.read().await;
        let matching = state
            .tasks
            .values()
            .filter(|t| t.project_id == filter.project_id)
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| filter.priority.is_none_or(|p| t.priority == p))
            .filter(|t| filter.assigned_to.is_none_or(|a| t.assigned_to == Some(a)))
            .filter(|t| matches_search(filter.search.as_deref(), &[t.title.as_str()]));
        let rows = state.sorted_views(matching);
        Ok(paginate(rows, page))
    }

    async fn list_by_project(&self, project_id: ProjectId) -> AppResult<Vec<TaskView>> {
        let state = self.state.read().await;
        Ok(state.sorted_views(state.tasks.values().filter(|t| t.project_id == project_id)))
    }
}
