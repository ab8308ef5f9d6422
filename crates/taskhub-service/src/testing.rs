//! Shared fixture for service tests, backed by the in-memory store.

use uuid::Uuid;

use taskhub_auth::Identity;
use taskhub_core::config::AuthConfig;
use taskhub_core::types::{TenantId, UserId};
use taskhub_database::repositories::{AuditLogRepository, UserRepository};
use taskhub_database::{MemoryStore, Repositories};
use taskhub_entity::audit::AuditLogEntry;
use taskhub_entity::tenant::{SubscriptionPlan, Tenant};
use taskhub_entity::user::User;

use crate::auth::{AuthService, RegisterTenantInput};
use crate::context::RequestContext;
use crate::project::ProjectService;
use crate::services::Services;
use crate::task::TaskService;
use crate::tenant::TenantService;
use crate::user::{AddUserInput, UserService};

pub const PASSWORD: &str = "correct-horse-1";

pub struct TestEnv {
    pub store: MemoryStore,
    pub auth: AuthService,
    pub tenants: TenantService,
    pub users: UserService,
    pub projects: ProjectService,
    pub tasks: TaskService,
}

impl TestEnv {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let repos = Repositories::in_memory(store.clone());
        let services = Services::new(&repos, &AuthConfig::default());
        Self {
            store,
            auth: services.auth,
            tenants: services.tenants,
            users: services.users,
            projects: services.projects,
            tasks: services.tasks,
        }
    }

    pub fn registration(&self, name: &str, subdomain: &str) -> RegisterTenantInput {
        RegisterTenantInput {
            tenant_name: name.to_string(),
            subdomain: subdomain.to_string(),
            subscription_plan: None,
            admin_email: format!("admin@{}.test", subdomain.to_lowercase()),
            admin_password: PASSWORD.to_string(),
            admin_full_name: format!("{name} Admin"),
        }
    }

    pub async fn register(
        &self,
        name: &str,
        subdomain: &str,
        plan: SubscriptionPlan,
    ) -> (Tenant, User) {
        let mut input = self.registration(name, subdomain);
        input.subscription_plan = Some(plan);
        self.auth.register_tenant(input, None).await.unwrap()
    }

    pub fn ctx_for(&self, user: &User) -> RequestContext {
        let identity = Identity::from_parts(user.id, user.tenant_id, user.role).unwrap();
        RequestContext::new(identity, Some("127.0.0.1".into()))
    }

    pub fn super_admin_ctx(&self) -> RequestContext {
        RequestContext::new(
            Identity::SuperAdmin {
                user_id: UserId::new(),
            },
            None,
        )
    }

    /// Add a plain member through the user service, acting as `admin`.
    pub async fn add_member(&self, admin: &User, tenant_id: TenantId, name: &str) -> User {
        let input = AddUserInput {
            email: format!("{name}@example.test"),
            password: PASSWORD.to_string(),
            full_name: name.to_string(),
            role: None,
        };
        self.users
            .add(&self.ctx_for(admin), tenant_id, input)
            .await
            .unwrap()
    }

    pub async fn store_user(&self, id: UserId) -> User {
        UserRepository::find_by_id(&self.store, id)
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn audit_for(&self, id: impl Into<Uuid>) -> Vec<AuditLogEntry> {
        AuditLogRepository::find_by_entity(&self.store, id.into())
            .await
            .unwrap()
    }
}
