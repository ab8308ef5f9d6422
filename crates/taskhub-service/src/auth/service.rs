//! Authentication service: tenant registration, credential checks, and
//! session token issuance.

use std::sync::Arc;

use tracing::{info, warn};

use taskhub_auth::{IssuedToken, JwtEncoder, PasswordHasher, PasswordValidator};
use taskhub_core::config::AuthConfig;
use taskhub_core::error::AppError;
use taskhub_database::repositories::{TenantRepository, UserRepository};
use taskhub_entity::audit::{AuditAction, CreateAuditLogEntry};
use taskhub_entity::tenant::{CreateTenant, SubscriptionPlan, Tenant};
use taskhub_entity::user::{CreateUser, User, UserRole};

use crate::audit::AuditRecorder;
use crate::context::RequestContext;
use crate::input::{normalize_email, normalize_subdomain, required};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Self-service registration of a new organization.
#[derive(Debug, Clone)]
pub struct RegisterTenantInput {
    pub tenant_name: String,
    pub subdomain: String,
    pub subscription_plan: Option<SubscriptionPlan>,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_full_name: String,
}

/// Credentials presented at login.
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    /// Tenant to log into; ignored for the super-admin.
    pub tenant_subdomain: Option<String>,
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: IssuedToken,
    pub user: User,
}

/// Handles registration and authentication.
#[derive(Clone)]
pub struct AuthService {
    tenants: Arc<dyn TenantRepository>,
    users: Arc<dyn UserRepository>,
    audit: AuditRecorder,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    super_admin_email: String,
}

impl AuthService {
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
            encoder: Arc::new(JwtEncoder::new(config)),
            super_admin_email: normalize_email(&config.super_admin_email),
        }
    }

    /// Whether `email` is the reserved super-admin login.
    pub fn is_reserved_email(&self, email: &str) -> bool {
        normalize_email(email) == self.super_admin_email
    }

    /// Create a tenant and its first `tenant_admin` in one transaction.
    pub async fn register_tenant(
        &self,
        input: RegisterTenantInput,
        ip_address: Option<String>,
    ) -> Result<(Tenant, User), AppError> {
        let name = required("Tenant name", &input.tenant_name)?;
        let subdomain = normalize_subdomain(&input.subdomain)?;
        let full_name = required("Full name", &input.admin_full_name)?;
        let email = normalize_email(&input.admin_email);
        if self.is_reserved_email(&email) {
            return Err(AppError::validation("This email address is reserved"));
        }
        self.validator.validate(&input.admin_password)?;

        if self.tenants.find_by_subdomain(&subdomain).await?.is_some() {
            return Err(AppError::conflict("Subdomain is already taken"));
        }

        let password_hash = self.hasher.hash_password(&input.admin_password)?;
        let plan = input.subscription_plan.unwrap_or_default();
        let (tenant, admin) = self
            .tenants
            .register(
                CreateTenant::with_plan(name, subdomain, plan),
                CreateUser {
                    tenant_id: None,
                    email,
                    password_hash,
                    full_name,
                    role: UserRole::TenantAdmin,
                },
            )
            .await?;

        self.audit
            .append(CreateAuditLogEntry {
                tenant_id: Some(tenant.id),
                user_id: Some(admin.id),
                action: AuditAction::RegisterTenant,
                entity_id: Some(tenant.id.into()),
                ip_address,
            })
            .await;

        info!(
            tenant_id = %tenant.id,
            subdomain = %tenant.subdomain,
            plan = %tenant.subscription_plan,
            "Tenant registered"
        );
        Ok((tenant, admin))
    }

    /// Verify credentials and issue a session token.
    ///
    /// Every failure short of an unknown subdomain collapses into one
    /// generic authentication error, and an unknown email still costs one
    /// password verification.
    pub async fn authenticate(&self, input: LoginInput) -> Result<LoginOutcome, AppError> {
        let email = normalize_email(&input.email);

        let user = if self.is_reserved_email(&email) {
            self.users.find_super_admin(&email).await?
        } else {
            match input
                .tenant_subdomain
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
            {
                Some(subdomain) => {
                    let tenant = self
                        .tenants
                        .find_by_subdomain(&subdomain.to_lowercase())
                        .await?
                        .ok_or_else(|| AppError::not_found("Tenant not found"))?;
                    self.users.find_by_email_in_tenant(&email, tenant.id).await?
                }
                None => self.users.find_super_admin(&email).await?,
            }
        };

        let user = match user {
            Some(user) => {
                let matches = self
                    .hasher
                    .verify_password(&input.password, &user.password_hash)
                    .unwrap_or_else(|e| {
                        warn!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                        false
                    });
                if !matches || !user.is_active {
                    return Err(AppError::authentication(INVALID_CREDENTIALS));
                }
                user
            }
            None => {
                self.hasher.verify_dummy(&input.password);
                return Err(AppError::authentication(INVALID_CREDENTIALS));
            }
        };

        let token = self.encoder.issue(&user)?;
        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(LoginOutcome { token, user })
    }

    /// The caller's current user record.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id())
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Create the super-admin account if none exists yet.
    ///
    /// An existing super-admin under a different email still counts, so
    /// changing the configured email never creates a second one. Returns
    /// `true` when an account was created.
    pub async fn ensure_super_admin(&self, password: &str) -> Result<bool, AppError> {
        if self.users.super_admin_exists().await? {
            return Ok(false);
        }

        self.validator.validate(password)?;
        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create(CreateUser {
                tenant_id: None,
                email: self.super_admin_email.clone(),
                password_hash,
                full_name: "Super Admin".to_string(),
                role: UserRole::SuperAdmin,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "Super-admin account created");
        Ok(true)
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("super_admin_email", &self.super_admin_email)
            .finish_non_exhaustive()
    }
}
