//! Tenant service: detail view, updates, and the super-admin tenant list.

use std::sync::Arc;

use tracing::info;

use taskhub_auth::{Action, ResourceDescriptor, authorize};
use taskhub_core::error::AppError;
use taskhub_core::types::{PageRequest, PageResponse, TenantId};
use taskhub_database::repositories::{TenantFilter, TenantRepository};
use taskhub_entity::audit::AuditAction;
use taskhub_entity::tenant::{Tenant, TenantDetail, TenantSummary, UpdateTenant};

use crate::audit::AuditRecorder;
use crate::context::RequestContext;
use crate::input::required;

#[derive(Clone)]
pub struct TenantService {
    tenants: Arc<dyn TenantRepository>,
    audit: AuditRecorder,
}

impl TenantService {
    pub fn new(tenants: Arc<dyn TenantRepository>, audit: AuditRecorder) -> Self {
        Self { tenants, audit }
    }

    async fn resolve(&self, id: TenantId) -> Result<Tenant, AppError> {
        self.tenants
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tenant not found"))
    }

    /// A tenant with its user, project and task counts.
    pub async fn get(&self, ctx: &RequestContext, id: TenantId) -> Result<TenantDetail, AppError> {
        let tenant = self.resolve(id).await?;
        authorize(
            &ctx.identity,
            Action::ViewTenant,
            &ResourceDescriptor::in_tenant(tenant.id),
        )
        .map_err(|d| d.for_entity("Tenant"))?;

        let stats = self.tenants.stats(tenant.id).await?;
        Ok(TenantDetail { tenant, stats })
    }

    /// Update a tenant.
    ///
    /// Tenant admins may only rename their tenant; status, plan and quota
    /// changes are reserved for the super-admin.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: TenantId,
        mut changes: UpdateTenant,
    ) -> Result<Tenant, AppError> {
        let mut tenant = self.resolve(id).await?;
        let action = if changes.touches_settings() {
            Action::UpdateTenantSettings
        } else {
            Action::UpdateTenantName
        };
        authorize(&ctx.identity, action, &ResourceDescriptor::in_tenant(tenant.id))
            .map_err(|d| d.for_entity("Tenant"))?;

        if let Some(name) = changes.name.take() {
            changes.name = Some(required("Tenant name", &name)?);
        }
        if changes.max_users.is_some_and(|n| n < 1) || changes.max_projects.is_some_and(|n| n < 0)
        {
            return Err(AppError::validation("Quota values are out of range"));
        }

        changes.apply(&mut tenant);
        let tenant = self.tenants.update(&tenant).await?;

        self.audit
            .record(ctx, Some(tenant.id), AuditAction::UpdateTenant, tenant.id)
            .await;
        info!(tenant_id = %tenant.id, user_id = %ctx.user_id(), "Tenant updated");
        Ok(tenant)
    }

    /// Every tenant, newest first. Super-admin only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: TenantFilter,
        page: PageRequest,
    ) -> Result<PageResponse<TenantSummary>, AppError> {
        authorize(&ctx.identity, Action::ListTenants, &ResourceDescriptor::platform())?;
        self.tenants.list(&filter, page).await
    }
}

impl std::fmt::Debug for TenantService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantService").finish_non_exhaustive()
    }
}
