//! PostgreSQL user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, TenantId, UserId};
use taskhub_entity::user::{CreateUser, User};

use super::{like_pattern, snapshot};
use crate::repositories::{UserFilter, UserRepository};

#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_super_admin(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users \
             WHERE tenant_id IS NULL AND role = 'super_admin' AND LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find super-admin", e))
    }

    async fn super_admin_exists(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE role = 'super_admin')",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check for a super-admin", e)
        })
    }

    async fn find_by_email_in_tenant(
        &self,
        email: &str,
        tenant_id: TenantId,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE tenant_id = $1 AND LOWER(email) = LOWER($2)",
        )
        .bind(tenant_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
        })
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let conflict = if data.tenant_id.is_none() {
            "A super-admin account already exists"
        } else {
            "A user with this email already exists in the tenant"
        };
        sqlx::query_as::<_, User>(
            "INSERT INTO users (tenant_id, email, password_hash, full_name, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(data.tenant_id)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.full_name)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_sqlx(e, "Failed to create user", conflict)
        })
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET full_name = $2, role = $3, is_active = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user.id)
        .bind(&user.full_name)
        .bind(user.role)
        .bind(user.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_tenant(&self, tenant_id: TenantId) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))
    }

    async fn list(&self, filter: &UserFilter, page: PageRequest) -> AppResult<PageResponse<User>> {
        let pattern = like_pattern(filter.search.as_deref());
        let mut tx = snapshot(&self.pool).await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users \
             WHERE tenant_id = $1 \
               AND ($2::text IS NULL OR full_name ILIKE $2 OR email ILIKE $2) \
               AND ($3::user_role IS NULL OR role = $3)",
        )
        .bind(filter.tenant_id)
        .bind(&pattern)
        .bind(filter.role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users \
             WHERE tenant_id = $1 \
               AND ($2::text IS NULL OR full_name ILIKE $2 OR email ILIKE $2) \
               AND ($3::user_role IS NULL OR role = $3) \
             ORDER BY created_at DESC, id \
             LIMIT $4 OFFSET $5",
        )
        .bind(filter.tenant_id)
        .bind(&pattern)
        .bind(filter.role)
        .bind(page.limit as i64)
        .bind(page.offset() as i64)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to end snapshot", e))?;

        Ok(PageResponse::new(users, page, total as u64))
    }
}
