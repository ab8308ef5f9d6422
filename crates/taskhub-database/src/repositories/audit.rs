//! Audit log persistence. Append-only from the application's side.

use async_trait::async_trait;
use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_entity::audit::{AuditLogEntry, CreateAuditLogEntry};

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, entry: CreateAuditLogEntry) -> AppResult<AuditLogEntry>;

    /// Entries recorded against one entity, oldest first.
    async fn find_by_entity(&self, entity_id: Uuid) -> AppResult<Vec<AuditLogEntry>>;
}
