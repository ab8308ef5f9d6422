//! Project persistence.

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, ProjectId, TenantId};
use taskhub_entity::project::{CreateProject, Project, ProjectStatus, ProjectSummary};

/// Filters for the project list.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Restrict to one tenant. `None` lists every tenant's projects.
    pub tenant_id: Option<TenantId>,
    /// Case-insensitive substring of the project name.
    pub search: Option<String>,
    pub status: Option<ProjectStatus>,
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>>;

    async fn create(&self, data: CreateProject) -> AppResult<Project>;

    /// Persist name, description and status and bump `updated_at`.
    async fn update(&self, project: &Project) -> AppResult<Project>;

    /// Delete a project and all of its tasks.
    async fn delete(&self, id: ProjectId) -> AppResult<bool>;

    async fn count_by_tenant(&self, tenant_id: TenantId) -> AppResult<i64>;

    /// Page through projects, most recently updated first.
    async fn list(
        &self,
        filter: &ProjectFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<ProjectSummary>>;
}
