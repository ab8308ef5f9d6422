//! The full set of services, wired from one [`Repositories`] bundle.

use std::sync::Arc;

use taskhub_auth::PasswordHasher;
use taskhub_core::config::AuthConfig;
use taskhub_database::Repositories;

use crate::audit::AuditRecorder;
use crate::auth::AuthService;
use crate::project::ProjectService;
use crate::task::TaskService;
use crate::tenant::TenantService;
use crate::user::UserService;

#[derive(Debug, Clone)]
pub struct Services {
    pub auth: AuthService,
    pub tenants: TenantService,
    pub users: UserService,
    pub projects: ProjectService,
    pub tasks: TaskService,
}

impl Services {
    pub fn new(repos: &Repositories, config: &AuthConfig) -> Self {
        let audit = AuditRecorder::new(Arc::clone(&repos.audit));
        let hasher = Arc::new(PasswordHasher::new());

        Self {
            auth: AuthService::new(
                Arc::clone(&repos.tenants),
                Arc::clone(&repos.users),
                audit.clone(),
                Arc::clone(&hasher),
                config,
            ),
            tenants: TenantService::new(Arc::clone(&repos.tenants), audit.clone()),
            users: UserService::new(
                Arc::clone(&repos.tenants),
                Arc::clone(&repos.users),
                audit.clone(),
                hasher,
                config,
            ),
            projects: ProjectService::new(
                Arc::clone(&repos.tenants),
                Arc::clone(&repos.projects),
                Arc::clone(&repos.tasks),
                audit.clone(),
            ),
            tasks: TaskService::new(
                Arc::clone(&repos.projects),
                Arc::clone(&repos.tasks),
                Arc::clone(&repos.users),
                audit,
            ),
        }
    }
}
