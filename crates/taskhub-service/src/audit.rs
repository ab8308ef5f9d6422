//! Best-effort audit recording.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use taskhub_core::types::TenantId;
use taskhub_database::repositories::AuditLogRepository;
use taskhub_entity::audit::{AuditAction, CreateAuditLogEntry};

use crate::context::RequestContext;

/// Appends audit entries. A failed write is logged and swallowed; it never
/// fails or rolls back the mutation being audited.
#[derive(Clone)]
pub struct AuditRecorder {
    repo: Arc<dyn AuditLogRepository>,
}

impl AuditRecorder {
    pub fn new(repo: Arc<dyn AuditLogRepository>) -> Self {
        Self { repo }
    }

    /// Record `action` by the caller in `ctx` against `entity_id`.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        tenant_id: Option<TenantId>,
        action: AuditAction,
        entity_id: impl Into<Uuid>,
    ) {
        self.append(CreateAuditLogEntry {
            tenant_id,
            user_id: Some(ctx.user_id()),
            action,
            entity_id: Some(entity_id.into()),
            ip_address: ctx.ip_address.clone(),
        })
        .await;
    }

    /// Record a prepared entry.
    pub async fn append(&self, entry: CreateAuditLogEntry) {
        let action = entry.action;
        if let Err(e) = self.repo.insert(entry).await {
            warn!(action = %action, error = %e, "Failed to write audit log entry");
        }
    }
}

impl std::fmt::Debug for AuditRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditRecorder").finish_non_exhaustive()
    }
}
