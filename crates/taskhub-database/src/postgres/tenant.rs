//! PostgreSQL tenant repository.

use async_trait::async_trait;
use sqlx::PgPool;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, TenantId};
use taskhub_entity::tenant::{CreateTenant, Tenant, TenantStats, TenantSummary};
use taskhub_entity::user::{CreateUser, User};

use super::{like_pattern, snapshot};
use crate::repositories::{TenantFilter, TenantRepository};

#[derive(Debug, Clone)]
pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn find_by_id(&self, id: TenantId) -> AppResult<Option<Tenant>> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tenant", e))
    }

    async fn find_by_subdomain(&self, subdomain: &str) -> AppResult<Option<Tenant>> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE subdomain = LOWER($1)")
            .bind(subdomain)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find tenant by subdomain", e)
            })
    }

    async fn register(&self, tenant: CreateTenant, admin: CreateUser) -> AppResult<(Tenant, User)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let tenant = sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (name, subdomain, status, subscription_plan, max_users, max_projects) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&tenant.name)
        .bind(&tenant.subdomain)
        .bind(tenant.status)
        .bind(tenant.subscription_plan)
        .bind(tenant.max_users)
        .bind(tenant.max_projects)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::from_sqlx(e, "Failed to create tenant", "Subdomain is already taken")
        })?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (tenant_id, email, password_hash, full_name, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(tenant.id)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(&admin.full_name)
        .bind(admin.role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::from_sqlx(e, "Failed to create tenant admin", "Email is already registered")
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit registration", e)
        })?;

        Ok((tenant, user))
    }

    async fn update(&self, tenant: &Tenant) -> AppResult<Tenant> {
        sqlx::query_as::<_, Tenant>(
            "UPDATE tenants SET name = $2, status = $3, subscription_plan = $4, \
             max_users = $5, max_projects = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(tenant.id)
        .bind(&tenant.name)
        .bind(tenant.status)
        .bind(tenant.subscription_plan)
        .bind(tenant.max_users)
        .bind(tenant.max_projects)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tenant", e))?
        .ok_or_else(|| AppError::not_found("Tenant not found"))
    }

    async fn list(
        &self,
        filter: &TenantFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<TenantSummary>> {
        let pattern = like_pattern(filter.search.as_deref());
        let mut tx = snapshot(&self.pool).await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tenants WHERE ($1::text IS NULL OR name ILIKE $1)")
                .bind(&pattern)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count tenants", e)
                })?;

        let items = sqlx::query_as::<_, TenantSummary>(
            "SELECT t.*, \
                (SELECT COUNT(*) FROM users u WHERE u.tenant_id = t.id) AS total_users, \
                (SELECT COUNT(*) FROM projects p WHERE p.tenant_id = t.id) AS total_projects \
             FROM tenants t \
             WHERE ($1::text IS NULL OR t.name ILIKE $1) \
             ORDER BY t.created_at DESC, t.id \
             LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(page.limit as i64)
        .bind(page.offset() as i64)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tenants", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to end snapshot", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    async fn stats(&self, id: TenantId) -> AppResult<TenantStats> {
        let (total_users, total_projects, total_tasks): (i64, i64, i64) = sqlx::query_as(
            "SELECT \
                (SELECT COUNT(*) FROM users WHERE tenant_id = $1), \
                (SELECT COUNT(*) FROM projects WHERE tenant_id = $1), \
                (SELECT COUNT(*) FROM tasks WHERE tenant_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load tenant stats", e))?;

        Ok(TenantStats {
            total_users,
            total_projects,
            total_tasks,
        })
    }
}
