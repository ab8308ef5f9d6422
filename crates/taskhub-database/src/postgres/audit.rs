//! PostgreSQL audit log repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_entity::audit::{AuditLogEntry, CreateAuditLogEntry};

use crate::repositories::AuditLogRepository;

#[derive(Debug, Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    async fn insert(&self, entry: CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_logs (tenant_id, user_id, action, entity_type, entity_id, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(entry.tenant_id)
        .bind(entry.user_id)
        .bind(entry.action.as_str())
        .bind(entry.action.entity_type())
        .bind(entry.entity_id)
        .bind(&entry.ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert audit entry", e))
    }

    async fn find_by_entity(&self, entity_id: Uuid) -> AppResult<Vec<AuditLogEntry>> {
        sqlx::query_as::<_, AuditLogEntry>(
            "SELECT * FROM audit_logs WHERE entity_id = $1 ORDER BY created_at ASC, id",
        )
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load audit entries", e))
    }
}
