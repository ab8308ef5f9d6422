//! PostgreSQL task repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, ProjectId, TaskId};
use taskhub_entity::task::{AssigneeInfo, CreateTask, Task, TaskView};

use super::{like_pattern, snapshot};
use crate::repositories::{TaskFilter, TaskRepository};

const TASK_VIEW_SELECT: &str = "SELECT t.*, u.full_name AS assignee_full_name, u.email AS assignee_email \
     FROM tasks t LEFT JOIN users u ON u.id = t.assigned_to";

const TASK_ORDER: &str = "ORDER BY t.priority DESC, t.due_date ASC NULLS LAST, t.created_at, t.id";

/// A task joined with its assignee's public fields.
#[derive(Debug, FromRow)]
struct TaskViewRow {
    #[sqlx(flatten)]
    task: Task,
    assignee_full_name: Option<String>,
    assignee_email: Option<String>,
}

impl From<TaskViewRow> for TaskView {
    fn from(row: TaskViewRow) -> Self {
        let assignee = match (row.task.assigned_to, row.assignee_full_name, row.assignee_email) {
            (Some(id), Some(full_name), Some(email)) => Some(AssigneeInfo {
                id,
                full_name,
                email,
            }),
            _ => None,
        };
        TaskView {
            task: row.task,
            assignee,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> AppResult<Option<Task>> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find task", e))
    }

    async fn create(&self, data: CreateTask) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks \
                (tenant_id, project_id, title, description, assigned_to, priority, status, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(data.tenant_id)
        .bind(data.project_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.assigned_to)
        .bind(data.priority)
        .bind(data.status)
        .bind(data.due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create task", e))
    }

    async fn update(&self, task: &Task) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET title = $2, description = $3, assigned_to = $4, priority = $5, \
             status = $6, due_date = $7, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.assigned_to)
        .bind(task.priority)
        .bind(task.status)
        .bind(task.due_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update task", e))?
        .ok_or_else(|| AppError::not_found("Task not found"))
    }

    async fn delete(&self, id: TaskId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete task", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<TaskView>> {
        let pattern = like_pattern(filter.search.as_deref());
        let conditions = "WHERE t.project_id = $1 \
               AND ($2::task_status IS NULL OR t.status = $2) \
               AND ($3::task_priority IS NULL OR t.priority = $3) \
               AND ($4::uuid IS NULL OR t.assigned_to = $4) \
               AND ($5::text IS NULL OR t.title ILIKE $5)";

        let mut tx = snapshot(&self.pool).await?;

        let count_sql = format!("SELECT COUNT(*) FROM tasks t {conditions}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.project_id)
            .bind(filter.status)
            .bind(filter.priority)
            .bind(filter.assigned_to)
            .bind(&pattern)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tasks", e))?;

        let select_sql = format!("{TASK_VIEW_SELECT} {conditions} {TASK_ORDER} LIMIT $6 OFFSET $7");
        let rows = sqlx::query_as::<_, TaskViewRow>(&select_sql)
            .bind(filter.project_id)
            .bind(filter.status)
            .bind(filter.priority)
            .bind(filter.assigned_to)
            .bind(&pattern)
            .bind(page.limit as i64)
            .bind(page.offset() as i64)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tasks", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to end snapshot", e))?;

        let items = rows.into_iter().map(TaskView::from).collect();
        Ok(PageResponse::new(items, page, total as u64))
    }

    async fn list_by_project(&self, project_id: ProjectId) -> AppResult<Vec<TaskView>> {
        let sql = format!("{TASK_VIEW_SELECT} WHERE t.project_id = $1 {TASK_ORDER}");
        let rows = sqlx::query_as::<_, TaskViewRow>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list project tasks", e)
            })?;
        Ok(rows.into_iter().map(TaskView::from).collect())
    }
}
