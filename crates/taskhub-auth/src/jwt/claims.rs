//! JWT claims carried by a session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::error::AppError;
use taskhub_core::types::{TenantId, UserId};
use taskhub_entity::user::UserRole;

use crate::identity::Identity;

/// Identity fields signed into every session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// Subject: the user ID.
    pub sub: UserId,
    /// The user's tenant; absent for the super-admin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
    /// Role at issuance.
    pub role: UserRole,
    pub email: String,
    pub full_name: String,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiration (seconds since epoch).
    pub exp: i64,
}

impl SessionClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// The identity these claims describe.
    ///
    /// A `super_admin` with a tenant, or a member without one, is rejected
    /// as an authentication failure.
    pub fn identity(&self) -> Result<Identity, AppError> {
        Identity::from_parts(self.sub, self.tenant_id, self.role)
            .ok_or_else(|| AppError::authentication("Invalid token claims"))
    }
}
