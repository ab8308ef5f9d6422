//! Tenant persistence.

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, TenantId};
use taskhub_entity::tenant::{CreateTenant, Tenant, TenantStats, TenantSummary};
use taskhub_entity::user::{CreateUser, User};

/// Filters for the tenant list.
#[derive(Debug, Clone, Default)]
pub struct TenantFilter {
    /// Case-insensitive substring of the tenant name.
    pub search: Option<String>,
}

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn find_by_id(&self, id: TenantId) -> AppResult<Option<Tenant>>;

    /// Look up a tenant by its (lowercase) subdomain.
    async fn find_by_subdomain(&self, subdomain: &str) -> AppResult<Option<Tenant>>;

    /// Create a tenant and its first admin atomically.
    ///
    /// `admin.tenant_id` is replaced by the new tenant's id. A taken
    /// subdomain yields a conflict and nothing is written.
    async fn register(&self, tenant: CreateTenant, admin: CreateUser) -> AppResult<(Tenant, User)>;

    /// Persist every mutable field of `tenant` and bump `updated_at`.
    async fn update(&self, tenant: &Tenant) -> AppResult<Tenant>;

    /// Page through tenants, newest first, with user and project counts.
    async fn list(
        &self,
        filter: &TenantFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<TenantSummary>>;

    async fn stats(&self, id: TenantId) -> AppResult<TenantStats>;
}
