//! The authenticated caller.

use serde::{Deserialize, Serialize};

use taskhub_core::types::{TenantId, UserId};
use taskhub_entity::user::UserRole;

/// Role of a tenant member. `super_admin` cannot appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantRole {
    TenantAdmin,
    User,
}

impl From<TenantRole> for UserRole {
    fn from(role: TenantRole) -> Self {
        match role {
            TenantRole::TenantAdmin => UserRole::TenantAdmin,
            TenantRole::User => UserRole::User,
        }
    }
}

/// Who is making a request.
///
/// The super-admin has no tenant; every other caller belongs to exactly
/// one. Encoding this in the type removes "null tenant means super-admin"
/// checks from the rest of the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    SuperAdmin {
        user_id: UserId,
    },
    TenantMember {
        user_id: UserId,
        tenant_id: TenantId,
        role: TenantRole,
    },
}

impl Identity {
    /// Build an identity from a stored role and tenant, or `None` when
    /// the pair is inconsistent.
    pub fn from_parts(user_id: UserId, tenant_id: Option<TenantId>, role: UserRole) -> Option<Self> {
        match (role, tenant_id) {
            (UserRole::SuperAdmin, None) => Some(Self::SuperAdmin { user_id }),
            (UserRole::TenantAdmin, Some(tenant_id)) => Some(Self::TenantMember {
                user_id,
                tenant_id,
                role: TenantRole::TenantAdmin,
            }),
            (UserRole::User, Some(tenant_id)) => Some(Self::TenantMember {
                user_id,
                tenant_id,
                role: TenantRole::User,
            }),
            _ => None,
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            Self::SuperAdmin { user_id } | Self::TenantMember { user_id, .. } => *user_id,
        }
    }

    /// The caller's tenant; `None` for the super-admin.
    pub fn tenant_id(&self) -> Option<TenantId> {
        match self {
            Self::SuperAdmin { .. } => None,
            Self::TenantMember { tenant_id, .. } => Some(*tenant_id),
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Self::SuperAdmin { .. })
    }

    pub fn is_tenant_admin(&self) -> bool {
        matches!(
            self,
            Self::TenantMember {
                role: TenantRole::TenantAdmin,
                ..
            }
        )
    }
}
