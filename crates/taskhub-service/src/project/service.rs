//! Project service: creation under quota, listing, and owner-gated edits.

use std::sync::Arc;

use tracing::info;

use taskhub_auth::{Action, ResourceDescriptor, authorize};
use taskhub_core::error::AppError;
use taskhub_core::types::{PageRequest, PageResponse, ProjectId, TenantId};
use taskhub_database::repositories::{
    ProjectFilter, ProjectRepository, TaskRepository, TenantRepository,
};
use taskhub_entity::audit::AuditAction;
use taskhub_entity::project::{
    CreateProject, Project, ProjectDetail, ProjectStatus, ProjectSummary, UpdateProject,
};

use crate::audit::AuditRecorder;
use crate::context::RequestContext;
use crate::input::required;

/// A new project.
#[derive(Debug, Clone, Default)]
pub struct CreateProjectInput {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    /// Required for the super-admin, ignored for everyone else.
    pub target_tenant_id: Option<TenantId>,
}

/// Filters for the project list.
#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    pub search: Option<String>,
    pub status: Option<ProjectStatus>,
    /// Only honoured for the super-admin.
    pub tenant_id: Option<TenantId>,
}

#[derive(Clone)]
pub struct ProjectService {
    tenants: Arc<dyn TenantRepository>,
    projects: Arc<dyn ProjectRepository>,
    tasks: Arc<dyn TaskRepository>,
    audit: AuditRecorder,
}

impl ProjectService {
    pub fn new(
        tenants: Arc<dyn TenantRepository>,
        projects: Arc<dyn ProjectRepository>,
        tasks: Arc<dyn TaskRepository>,
        audit: AuditRecorder,
    ) -> Self {
        Self {
            tenants,
            projects,
            tasks,
            audit,
        }
    }

    async fn resolve(&self, id: ProjectId) -> Result<Project, AppError> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))
    }

    /// Create a project in the caller's tenant, or in `target_tenant_id`
    /// when the caller is the super-admin.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateProjectInput,
    ) -> Result<Project, AppError> {
        let tenant_id = match ctx.tenant_id() {
            Some(own) => own,
            None => input.target_tenant_id.ok_or_else(|| {
                AppError::validation("targetTenantId is required for the super-admin")
            })?,
        };
        let tenant = self
            .tenants
            .find_by_id(tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Tenant not found"))?;

        authorize(
            &ctx.identity,
            Action::CreateProject,
            &ResourceDescriptor::in_tenant(tenant.id),
        )
        .map_err(|d| d.for_entity("Tenant"))?;

        let name = required("Project name", &input.name)?;

        if !ctx.is_super_admin() {
            let current = self.projects.count_by_tenant(tenant.id).await?;
            if current >= i64::from(tenant.max_projects) {
                return Err(AppError::quota_exceeded(format!(
                    "Project limit of {} reached for this tenant's plan",
                    tenant.max_projects
                )));
            }
        }

        let project = self
            .projects
            .create(CreateProject {
                tenant_id: tenant.id,
                name,
                description: input.description,
                status: input.status.unwrap_or_default(),
                created_by: ctx.user_id(),
            })
            .await?;

        self.audit
            .record(ctx, Some(tenant.id), AuditAction::CreateProject, project.id)
            .await;
        info!(
            tenant_id = %tenant.id,
            project_id = %project.id,
            user_id = %ctx.user_id(),
            "Project created"
        );
        Ok(project)
    }

    /// Projects visible to the caller, most recently updated first.
    ///
    /// Tenant members always see their own tenant only, whatever
    /// `query.tenant_id` says.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: ProjectQuery,
        page: PageRequest,
    ) -> Result<PageResponse<ProjectSummary>, AppError> {
        let scope = ctx.tenant_id().or(query.tenant_id);
        let resource = match scope {
            Some(tenant_id) => ResourceDescriptor::in_tenant(tenant_id),
            None => ResourceDescriptor::platform(),
        };
        authorize(&ctx.identity, Action::ListProjects, &resource)?;

        let filter = ProjectFilter {
            tenant_id: scope,
            search: query.search,
            status: query.status,
        };
        self.projects.list(&filter, page).await
    }

    /// A project with all of its tasks.
    pub async fn get(&self, ctx: &RequestContext, id: ProjectId) -> Result<ProjectDetail, AppError> {
        let project = self.resolve(id).await?;
        authorize(
            &ctx.identity,
            Action::ViewProject,
            &ResourceDescriptor::in_tenant(project.tenant_id),
        )
        .map_err(|d| d.for_entity("Project"))?;

        let tasks = self.tasks.list_by_project(project.id).await?;
        Ok(ProjectDetail { project, tasks })
    }

    /// Update name, description or status. Creator or tenant admin.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
        mut changes: UpdateProject,
    ) -> Result<Project, AppError> {
        let mut project = self.resolve(id).await?;
        authorize(
            &ctx.identity,
            Action::UpdateProject,
            &ResourceDescriptor::owned(project.tenant_id, project.created_by),
        )
        .map_err(|d| d.for_entity("Project"))?;

        if let Some(name) = changes.name.take() {
            changes.name = Some(required("Project name", &name)?);
        }

        changes.apply(&mut project);
        let project = self.projects.update(&project).await?;

        self.audit
            .record(ctx, Some(project.tenant_id), AuditAction::UpdateProject, project.id)
            .await;
        info!(project_id = %project.id, user_id = %ctx.user_id(), "Project updated");
        Ok(project)
    }

    /// Delete a project together with its tasks. Creator or tenant admin.
    pub async fn delete(&self, ctx: &RequestContext, id: ProjectId) -> Result<(), AppError> {
        let project = self.resolve(id).await?;
        authorize(
            &ctx.identity,
            Action::DeleteProject,
            &ResourceDescriptor::owned(project.tenant_id, project.created_by),
        )
        .map_err(|d| d.for_entity("Project"))?;

        if !self.projects.delete(project.id).await? {
            return Err(AppError::not_found("Project not found"));
        }

        self.audit
            .record(ctx, Some(project.tenant_id), AuditAction::DeleteProject, project.id)
            .await;
        info!(project_id = %project.id, tenant_id = %project.tenant_id, "Project deleted");
        Ok(())
    }
}

impl std::fmt::Debug for ProjectService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectService").finish_non_exhaustive()
    }
}
