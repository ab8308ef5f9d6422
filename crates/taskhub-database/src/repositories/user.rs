//! User persistence (the credential store).

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, TenantId, UserId};
use taskhub_entity::user::{CreateUser, User, UserRole};

/// Filters for the per-tenant user list.
#[derive(Debug, Clone)]
pub struct UserFilter {
    /// The tenant whose users are listed. Always set.
    pub tenant_id: TenantId,
    /// Case-insensitive substring of full name or email.
    pub search: Option<String>,
    pub role: Option<UserRole>,
}

impl UserFilter {
    pub fn for_tenant(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            search: None,
            role: None,
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// The tenant-less `super_admin` account with this email, if any.
    async fn find_super_admin(&self, email: &str) -> AppResult<Option<User>>;

    /// Whether any `super_admin` account exists, whatever its email.
    async fn super_admin_exists(&self) -> AppResult<bool>;

    /// A member of `tenant_id` with this email, if any.
    async fn find_by_email_in_tenant(
        &self,
        email: &str,
        tenant_id: TenantId,
    ) -> AppResult<Option<User>>;

    /// Insert a user. A duplicate `(tenant_id, email)` is a conflict.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Persist name, role and active flag of `user` and bump `updated_at`.
    async fn update(&self, user: &User) -> AppResult<User>;

    /// Delete a user. Returns `false` if no row existed.
    async fn delete(&self, id: UserId) -> AppResult<bool>;

    async fn count_by_tenant(&self, tenant_id: TenantId) -> AppResult<i64>;

    /// Page through a tenant's users, newest first.
    async fn list(&self, filter: &UserFilter, page: PageRequest) -> AppResult<PageResponse<User>>;
}
