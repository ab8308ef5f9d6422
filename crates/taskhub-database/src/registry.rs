//! The injectable set of repositories.

use std::sync::Arc;

use sqlx::PgPool;

use crate::memory::MemoryStore;
use crate::postgres::{
    PgAuditLogRepository, PgHealthProbe, PgProjectRepository, PgTaskRepository,
    PgTenantRepository, PgUserRepository,
};
use crate::repositories::{
    AuditLogRepository, HealthProbe, ProjectRepository, TaskRepository, TenantRepository,
    UserRepository,
};

/// One backend's implementation of every repository trait.
#[derive(Clone)]
pub struct Repositories {
    pub tenants: Arc<dyn TenantRepository>,
    pub users: Arc<dyn UserRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub audit: Arc<dyn AuditLogRepository>,
    pub health: Arc<dyn HealthProbe>,
}

impl Repositories {
    /// Repositories backed by a PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            tenants: Arc::new(PgTenantRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            projects: Arc::new(PgProjectRepository::new(pool.clone())),
            tasks: Arc::new(PgTaskRepository::new(pool.clone())),
            audit: Arc::new(PgAuditLogRepository::new(pool.clone())),
            health: Arc::new(PgHealthProbe::new(pool)),
        }
    }

    /// Repositories sharing one in-memory store.
    pub fn in_memory(store: MemoryStore) -> Self {
        Self {
            tenants: Arc::new(store.clone()),
            users: Arc::new(store.clone()),
            projects: Arc::new(store.clone()),
            tasks: Arc::new(store.clone()),
            audit: Arc::new(store.clone()),
            health: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
