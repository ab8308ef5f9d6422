//! The authorization decision function.

use thiserror::Error;

use taskhub_core::error::AppError;
use taskhub_core::types::{TenantId, UserId};

use super::action::{Action, Requirement};
use crate::identity::Identity;

/// What the policy needs to know about the target of an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// The tenant owning the resource. `None` for platform-wide targets.
    pub tenant_id: Option<TenantId>,
    /// The owning user: a project's creator, a task's project creator, or
    /// the targeted user for profile updates.
    pub owner_id: Option<UserId>,
}

impl ResourceDescriptor {
    /// A target with no tenant (e.g. the tenant list).
    pub fn platform() -> Self {
        Self::default()
    }

    /// A target owned by a tenant but by no particular user.
    pub fn in_tenant(tenant_id: TenantId) -> Self {
        Self {
            tenant_id: Some(tenant_id),
            owner_id: None,
        }
    }

    /// A target owned by a tenant and, optionally, a user.
    pub fn owned(tenant_id: TenantId, owner_id: Option<UserId>) -> Self {
        Self {
            tenant_id: Some(tenant_id),
            owner_id,
        }
    }
}

/// Why access was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// The resource belongs to another tenant; its existence is hidden.
    #[error("not found")]
    NotFound,
    /// The caller can see the resource but lacks the privilege.
    #[error("forbidden")]
    Forbidden,
}

impl AccessDenied {
    /// Convert into an [`AppError`] naming the resource kind.
    pub fn for_entity(self, entity: &str) -> AppError {
        match self {
            Self::NotFound => AppError::not_found(format!("{entity} not found")),
            Self::Forbidden => {
                AppError::authorization("You do not have permission to perform this action")
            }
        }
    }
}

impl From<AccessDenied> for AppError {
    fn from(denied: AccessDenied) -> Self {
        denied.for_entity("Resource")
    }
}

/// Decide whether `identity` may perform `action` on `resource`.
///
/// Rules, first match wins:
/// 1. the super-admin is always allowed;
/// 2. a resource of another tenant is reported as not found;
/// 3. super-admin-only actions are forbidden;
/// 4. tenant-admin actions are forbidden to plain users;
/// 5. owner-or-admin actions are forbidden to non-owners;
/// 6. self-or-admin actions are forbidden on other users;
/// 7. anything else is allowed.
pub fn authorize(
    identity: &Identity,
    action: Action,
    resource: &ResourceDescriptor,
) -> Result<(), AccessDenied> {
    let (user_id, tenant_id) = match identity {
        Identity::SuperAdmin { .. } => return Ok(()),
        Identity::TenantMember {
            user_id, tenant_id, ..
        } => (*user_id, *tenant_id),
    };

    if resource.tenant_id.is_some_and(|t| t != tenant_id) {
        return Err(AccessDenied::NotFound);
    }

    let is_admin = identity.is_tenant_admin();
    let is_owner = resource.owner_id == Some(user_id);

    let allowed = match action.requirement() {
        Requirement::SuperAdmin => false,
        Requirement::TenantAdmin => is_admin,
        Requirement::OwnerOrAdmin | Requirement::SelfOrAdmin => is_admin || is_owner,
        Requirement::Member => true,
    };

    if allowed {
        Ok(())
    } else {
        Err(AccessDenied::Forbidden)
    }
}
