//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::types::{AuditLogId, TenantId, UserId};
use uuid::Uuid;

use super::action::AuditAction;

/// An append-only record of a mutation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Unique entry identifier.
    pub id: AuditLogId,
    /// Tenant of the affected resource.
    pub tenant_id: Option<TenantId>,
    /// The acting user.
    pub user_id: Option<UserId>,
    /// Action name (e.g. `"CREATE_PROJECT"`).
    pub action: String,
    /// Affected entity type (e.g. `"project"`).
    pub entity_type: String,
    /// Affected entity id.
    pub entity_id: Option<Uuid>,
    /// Client IP address, when known.
    pub ip_address: Option<String>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to append an audit entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLogEntry {
    pub tenant_id: Option<TenantId>,
    pub user_id: Option<UserId>,
    pub action: AuditAction,
    pub entity_id: Option<Uuid>,
    pub ip_address: Option<String>,
}
