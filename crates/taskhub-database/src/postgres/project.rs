//! PostgreSQL project repository.

use async_trait::async_trait;
use sqlx::PgPool;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, ProjectId, TenantId};
use taskhub_entity::project::{CreateProject, Project, ProjectSummary};

use super::{like_pattern, snapshot};
use crate::repositories::{ProjectFilter, ProjectRepository};

#[derive(Debug, Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    async fn create(&self, data: CreateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (tenant_id, name, description, status, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(data.tenant_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.status)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create project", e))
    }

    async fn update(&self, project: &Project) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET name = $2, description = $3, status = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update project", e))?
        .ok_or_else(|| AppError::not_found("Project not found"))
    }

    async fn delete(&self, id: ProjectId) -> AppResult<bool> {
        // Tasks go with the project via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete project", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_tenant(&self, tenant_id: TenantId) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count projects", e))
    }

    async fn list(
        &self,
        filter: &ProjectFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<ProjectSummary>> {
        let pattern = like_pattern(filter.search.as_deref());
        let mut tx = snapshot(&self.pool).await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM projects p \
             WHERE ($1::uuid IS NULL OR p.tenant_id = $1) \
               AND ($2::text IS NULL OR p.name ILIKE $2) \
               AND ($3::project_status IS NULL OR p.status = $3)",
        )
        .bind(filter.tenant_id)
        .bind(&pattern)
        .bind(filter.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count projects", e))?;

        let items = sqlx::query_as::<_, ProjectSummary>(
            "SELECT p.*, \
                (SELECT COUNT(*) FROM tasks t WHERE t.project_id = p.id) AS task_count, \
                u.full_name AS creator_name, \
                tn.name AS tenant_name \
             FROM projects p \
             LEFT JOIN users u ON u.id = p.created_by \
             LEFT JOIN tenants tn ON tn.id = p.tenant_id \
             WHERE ($1::uuid IS NULL OR p.tenant_id = $1) \
               AND ($2::text IS NULL OR p.name ILIKE $2) \
               AND ($3::project_status IS NULL OR p.status = $3) \
             ORDER BY p.updated_at DESC, p.id \
             LIMIT $4 OFFSET $5",
        )
        .bind(filter.tenant_id)
        .bind(&pattern)
        .bind(filter.status)
        .bind(page.limit as i64)
        .bind(page.offset() as i64)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to end snapshot", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }
}
