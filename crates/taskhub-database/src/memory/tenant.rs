use async_trait::async_trait;
use chrono::Utc;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, TenantId, UserId};
use taskhub_entity::tenant::{CreateTenant, Tenant, TenantStats, TenantSummary};
use taskhub_entity::user::{CreateUser, User};

use super::{MemoryStore, matches_search, paginate};
use crate::repositories::{TenantFilter, TenantRepository};

#[async_trait]
impl TenantRepository for MemoryStore {
    async fn find_by_id(&self, id: TenantId) -> AppResult<Option<Tenant>> {
        Ok(self.state.read().await.tenants.get(&id).cloned())
    }

    async fn find_by_subdomain(&self, subdomain: &str) -> AppResult<Option<Tenant>> {
        let subdomain = subdomain.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .tenants
            .values()
            .find(|t| t.subdomain == subdomain)
            .cloned())
    }

    async fn register(&self, tenant: CreateTenant, admin: CreateUser) -> AppResult<(Tenant, User)> {
        let mut state = self.state.write().await;
        if state.tenants.values().any(|t| t.subdomain == tenant.subdomain) {
            return Err(AppError::conflict("Subdomain is already taken"));
        }

        let now = Utc::now();
        let tenant = Tenant {
            id: TenantId::new(),
            name: tenant.name,
            subdomain: tenant.subdomain,
            status: tenant.status,
            subscription_plan: tenant.subscription_plan,
            max_users: tenant.max_users,
            max_projects: tenant.max_projects,
            created_at: now,
            updated_at: now,
        };
        let user = User {
            id: UserId::new(),
            tenant_id: Some(tenant.id),
            email: admin.email,
            password_hash: admin.password_hash,
            full_name: admin.full_name,
            role: admin.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        state.tenants.insert(tenant.id, tenant.clone());
        state.users.insert(user.id, user.clone());
        Ok((tenant, user))
    }

    async fn update(&self, tenant: &Tenant) -> AppResult<Tenant> {
        let mut state = self.state.write().await;
        let stored = state
            .tenants
            .get_mut(&tenant.id)
            .ok_or_else(|| AppError::not_found("Tenant not found"))?;

        stored.name = tenant.name.clone();
        stored.status = tenant.status;
        stored.subscription_plan = tenant.subscription_plan;
        stored.max_users = tenant.max_users;
        stored.max_projects = tenant.max_projects;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn list(
        &self,
        filter: &TenantFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<TenantSummary>> {
        let state = self.state.read().await;
        let mut rows: Vec<TenantSummary> = state
            .tenants
            .values()
            .filter(|t| matches_search(filter.search.as_deref(), &[t.name.as_str()]))
            .map(|t| TenantSummary {
                tenant: t.clone(),
                total_users: state.count_users(t.id),
                total_projects: state.count_projects(t.id),
            })
            .collect();
        rows.sort_by(|a, b| {
            b.tenant
                .created_at
                .cmp(&a.tenant.created_at)
                .then_with(|| a.tenant.id.cmp(&b.tenant.id))
        });
        Ok(paginate(rows, page))
    }

    async fn stats(&self, id: TenantId) -> AppResult<TenantStats> {
        let state = self.state.read().await;
        Ok(TenantStats {
            total_users: state.count_users(id),
            total_projects: state.count_projects(id),
            total_tasks: state.tasks.values().filter(|t| t.tenant_id == id).count() as i64,
        })
    }
}
