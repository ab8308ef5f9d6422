//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};

use taskhub_auth::Identity;
use taskhub_core::types::{TenantId, UserId};

/// Who is acting, and from where.
///
/// Built by the HTTP layer from a verified session token and passed into
/// every service method.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub identity: Identity,
    /// Client IP address, recorded in the audit log.
    pub ip_address: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(identity: Identity, ip_address: Option<String>) -> Self {
        Self {
            identity,
            ip_address,
            request_time: Utc::now(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.identity.user_id()
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.identity.tenant_id()
    }

    pub fn is_super_admin(&self) -> bool {
        self.identity.is_super_admin()
    }
}
