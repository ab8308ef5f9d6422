use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_core::types::AuditLogId;
use taskhub_entity::audit::{AuditLogEntry, CreateAuditLogEntry};

use super::MemoryStore;
use crate::repositories::AuditLogRepository;

#[async_trait]
impl AuditLogRepository for MemoryStore {
    async fn insert(&self, entry: CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        let entry = AuditLogEntry {
            id: AuditLogId::new(),
            tenant_id: entry.tenant_id,
            user_id: entry.user_id,
            action: entry.action.as_str().to_string(),
            entity_type: entry.action.entity_type().to_string(),
            entity_id: entry.entity_id,
            ip_address: entry.ip_address,
            created_at: Utc::now(),
        };
        self.state.write().await.audit.push(entry.clone());
        Ok(entry)
    }

    async fn find_by_entity(&self, entity_id: Uuid) -> AppResult<Vec<AuditLogEntry>> {
        let state = self.state.read().await;
        Ok(state
            .audit
            .iter()
            .filter(|e| e.entity_id == Some(entity_id))
            .cloned()
            .collect())
    }
}
