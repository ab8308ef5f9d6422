use async_trait::async_trait;
use chrono::Utc;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, TenantId, UserId};
use taskhub_entity::user::{CreateUser, User, UserRole};

use super::{MemoryStore, matches_search, paginate};
use crate::repositories::{UserFilter, UserRepository};

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_super_admin(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| {
                u.tenant_id.is_none()
                    && u.role == UserRole::SuperAdmin
                    && u.email.eq_ignore_ascii_case(email)
            })
            .cloned())
    }

    async fn super_admin_exists(&self) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state.users.values().any(|u| u.role == UserRole::SuperAdmin))
    }

    async fn find_by_email_in_tenant(
        &self,
        email: &str,
        tenant_id: TenantId,
    ) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.tenant_id == Some(tenant_id) && u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        // NULL tenant ids never collide on the email key; the partial index
        // on role still allows only one super-admin.
        if data.role == UserRole::SuperAdmin
            && state.users.values().any(|u| u.role == UserRole::SuperAdmin)
        {
            return Err(AppError::conflict("A super-admin account already exists"));
        }
        if let Some(tenant_id) = data.tenant_id {
            if !state.tenants.contains_key(&tenant_id) {
                return Err(AppError::database("Tenant does not exist"));
            }
            let taken = state
                .users
                .values()
                .any(|u| u.tenant_id == Some(tenant_id) && u.email.eq_ignore_ascii_case(&data.email));
            if taken {
                return Err(AppError::conflict(
                    "A user with this email already exists in the tenant",
                ));
            }
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            tenant_id: data.tenant_id,
            email: data.email,
            password_hash: data.password_hash,
            full_name: data.full_name,
            role: data.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut state = self.state.write().await;
        let stored = state
            .users
            .get_mut(&user.id)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        stored.full_name = user.full_name.clone();
        stored.role = user.role;
        stored.is_active = user.is_active;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }
        // ON DELETE SET NULL
        for project in state.projects.values_mut() {
            if project.created_by == Some(id) {
                project.created_by = None;
            }
        }
        for task in state.tasks.values_mut() {
            if task.assigned_to == Some(id) {
                task.assigned_to = None;
            }
        }
        Ok(true)
    }

    async fn count_by_tenant(&self, tenant_id: TenantId) -> AppResult<i64> {
        Ok(self.state.read().await.count_users(tenant_id))
    }

    async fn list(&self, filter: &UserFilter, page: PageRequest) -> AppResult<PageResponse<User>> {
        let state = self.state.read().await;
        let mut rows: Vec<User> = state
            .users
            .values()
            .filter(|u| u.tenant_id == Some(filter.tenant_id))
            .filter(|u| filter.role.is_none_or(|role| u.role == role))
            .filter(|u| matches_search(filter.search.as_deref(), &[u.full_name.as_str(), u.email.as_str()]))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(paginate(rows, page))
    }
}
