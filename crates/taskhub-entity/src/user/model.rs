//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::types::{TenantId, UserId};

use super::role::UserRole;

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Owning tenant; `None` only for the super-admin.
    pub tenant_id: Option<TenantId>,
    /// Login email, unique within the tenant.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Full display name.
    pub full_name: String,
    /// Role.
    pub role: UserRole,
    /// Deactivated accounts cannot log in.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether this account is the platform super-admin.
    pub fn is_super_admin(&self) -> bool {
        self.role.is_super_admin() && self.tenant_id.is_none()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Owning tenant.
    pub tenant_id: Option<TenantId>,
    /// Login email (already normalized).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Full display name.
    pub full_name: String,
    /// Assigned role.
    pub role: UserRole,
}

/// Partial update of a user. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    /// New display name.
    pub full_name: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New active flag.
    pub is_active: Option<bool>,
}

impl UpdateUser {
    /// Whether the update changes privileged fields (role, active flag).
    pub fn touches_access(&self) -> bool {
        self.role.is_some() || self.is_active.is_some()
    }

    /// Apply the changes onto `user`.
    pub fn apply(self, user: &mut User) {
        if let Some(full_name) = self.full_name {
            user.full_name = full_name;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}
