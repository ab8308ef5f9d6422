//! User service: adding, listing, updating, and removing tenant members.

use std::sync::Arc;

use tracing::info;

use taskhub_auth::{Action, PasswordHasher, PasswordValidator, ResourceDescriptor, authorize};
use taskhub_core::config::AuthConfig;
use taskhub_core::error::AppError;
use taskhub_core::types::{PageRequest, PageResponse, TenantId, UserId};
use taskhub_database::repositories::{TenantRepository, UserFilter, UserRepository};
use taskhub_entity::audit::AuditAction;
use taskhub_entity::tenant::Tenant;
use taskhub_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::audit::AuditRecorder;
use crate::context::RequestContext;
use crate::input::{normalize_email, required};

/// A new member for a tenant.
#[derive(Debug, Clone)]
pub struct AddUserInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// Defaults to [`UserRole::User`].
    pub role: Option<UserRole>,
}

/// Filters for the member list.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub search: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Clone)]
pub struct UserService {
    tenants: Arc<dyn TenantRepository>,
    users: Arc<dyn UserRepository>,
    audit: AuditRecorder,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    super_admin_email: String,
}

impl UserService {
    pub fn new(
        tenants: Arc<dyn TenantRepository>,
        users: Arc<dyn UserRepository>,
        audit: AuditRecorder,
        hasher: Arc<PasswordHasher>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            tenants,
            users,
            audit,
            hasher,
            validator: Arc::new(PasswordValidator::new(config)),
            super_admin_email: normalize_email(&config.super_admin_email),
        }
    }

    async fn resolve_tenant(&self, id: TenantId) -> Result<Tenant, AppError> {
        self.tenants
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tenant not found"))
    }

    /// Load a user. Tenant members cannot see the tenant-less super-admin.
    async fn resolve_user(&self, ctx: &RequestContext, id: UserId) -> Result<(User, TenantId), AppError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        match user.tenant_id {
            Some(tenant_id) => Ok((user, tenant_id)),
            None if ctx.is_super_admin() => Err(AppError::validation(
                "The super-admin account cannot be managed here",
            )),
            None => Err(AppError::not_found("User not found")),
        }
    }

    /// Add a member to `tenant_id`, enforcing the tenant's user quota.
    pub async fn add(
        &self,
        ctx: &RequestContext,
        tenant_id: TenantId,
        input: AddUserInput,
    ) -> Result<User, AppError> {
        let tenant = self.resolve_tenant(tenant_id).await?;
        authorize(
            &ctx.identity,
            Action::CreateUser,
            &ResourceDescriptor::in_tenant(tenant.id),
        )
        .map_err(|d| d.for_entity("Tenant"))?;

        let role = input.role.unwrap_or_default();
        if role == UserRole::SuperAdmin {
            return Err(AppError::validation("The super_admin role cannot be assigned"));
        }
        let email = normalize_email(&input.email);
        if email == self.super_admin_email {
            return Err(AppError::validation("This email address is reserved"));
        }
        let full_name = required("Full name", &input.full_name)?;
        self.validator.validate(&input.password)?;

        if !ctx.is_super_admin() {
            let current = self.users.count_by_tenant(tenant.id).await?;
            if current >= i64::from(tenant.max_users) {
                return Err(AppError::quota_exceeded(format!(
                    "User limit of {} reached for this tenant's plan",
                    tenant.max_users
                )));
            }
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(CreateUser {
                tenant_id: Some(tenant.id),
                email,
                password_hash,
                full_name,
                role,
            })
            .await?;

        self.audit
            .record(ctx, Some(tenant.id), AuditAction::CreateUser, user.id)
            .await;
        info!(
            tenant_id = %tenant.id,
            user_id = %user.id,
            role = %user.role,
            "User added to tenant"
        );
        Ok(user)
    }

    /// Members of `tenant_id`, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        tenant_id: TenantId,
        query: UserQuery,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        let tenant = self.resolve_tenant(tenant_id).await?;
        authorize(
            &ctx.identity,
            Action::ListUsers,
            &ResourceDescriptor::in_tenant(tenant.id),
        )
        .map_err(|d| d.for_entity("Tenant"))?;

        let filter = UserFilter {
            tenant_id: tenant.id,
            search: query.search,
            role: query.role,
        };
        self.users.list(&filter, page).await
    }

    /// Update a user.
    ///
    /// Users may change their own name; role and active-flag changes need a
    /// tenant admin.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: UserId,
        mut changes: UpdateUser,
    ) -> Result<User, AppError> {
        let (mut user, tenant_id) = self.resolve_user(ctx, id).await?;
        let action = if changes.touches_access() {
            Action::UpdateUserAccess
        } else {
            Action::UpdateUserProfile
        };
        authorize(
            &ctx.identity,
            action,
            &ResourceDescriptor::owned(tenant_id, Some(user.id)),
        )
        .map_err(|d| d.for_entity("User"))?;

        if changes.role == Some(UserRole::SuperAdmin) {
            return Err(AppError::validation("The super_admin role cannot be assigned"));
        }
        if let Some(name) = changes.full_name.take() {
            changes.full_name = Some(required("Full name", &name)?);
        }

        changes.apply(&mut user);
        let user = self.users.update(&user).await?;

        self.audit
            .record(ctx, Some(tenant_id), AuditAction::UpdateUser, user.id)
            .await;
        info!(user_id = %user.id, actor_id = %ctx.user_id(), "User updated");
        Ok(user)
    }

    /// Remove a user from their tenant. Nobody can delete themselves.
    pub async fn delete(&self, ctx: &RequestContext, id: UserId) -> Result<(), AppError> {
        let (user, tenant_id) = self.resolve_user(ctx, id).await?;
        authorize(
            &ctx.identity,
            Action::DeleteUser,
            &ResourceDescriptor::owned(tenant_id, Some(user.id)),
        )
        .map_err(|d| d.for_entity("User"))?;

        if user.id == ctx.user_id() {
            return Err(AppError::authorization("You cannot delete your own account"));
        }

        if !self.users.delete(user.id).await? {
            return Err(AppError::not_found("User not found"));
        }

        self.audit
            .record(ctx, Some(tenant_id), AuditAction::DeleteUser, user.id)
            .await;
        info!(user_id = %user.id, tenant_id = %tenant_id, "User deleted");
        Ok(())
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}
