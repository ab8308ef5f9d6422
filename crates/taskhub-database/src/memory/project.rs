use async_trait::async_trait;
use chrono::Utc;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, ProjectId, TenantId};
use taskhub_entity::project::{CreateProject, Project, ProjectSummary};

use super::{MemoryStore, matches_search, paginate};
use crate::repositories::{ProjectFilter, ProjectRepository};

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        Ok(self.state.read().await.projects.get(&id).cloned())
    }

    async fn create(&self, data: CreateProject) -> AppResult<Project> {
        let mut state = self.state.write().await;
        if !state.tenants.contains_key(&data.tenant_id) {
            return Err(AppError::database("Tenant does not exist"));
        }

        let now = Utc::now();
        let project = Project {
            id: ProjectId::new(),
            tenant_id: data.tenant_id,
            name: data.name,
            description: data.description,
            status: data.status,
            created_by: Some(data.created_by),
            created_at: now,
            updated_at: now,
        };
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update(&self, project: &Project) -> AppResult<Project> {
        let mut state = self.state.write().await;
        let stored = state
            .projects
            .get_mut(&project.id)
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        stored.name = project.name.clone();
        stored.description = project.description.clone();
        stored.status = project.status;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: ProjectId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state.projects.remove(&id).is_none() {
            return Ok(false);
        }
        state.tasks.retain(|_, task| task.project_id != id);
        Ok(true)
    }

    async fn count_by_tenant(&self, tenant_id: TenantId) -> AppResult<i64> {
        Ok(self.state.read().await.count_projects(tenant_id))
    }

    async fn list(
        &self,
        filter: &ProjectFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<ProjectSummary>> {
        let state = self.state.read().await;
        let mut rows: Vec<ProjectSummary> = state
            .projects
            .values()
            .filter(|p| filter.tenant_id.is_none_or(|t| p.tenant_id == t))
            .filter(|p| filter.status.is_none_or(|s| p.status == s))
            .filter(|p| matches_search(filter.search.as_deref(), &[p.name.as_str()]))
            .map(|p| ProjectSummary {
                project: p.clone(),
                task_count: state.tasks.values().filter(|t| t.project_id == p.id).count() as i64,
                creator_name: p
                    .created_by
                    .and_then(|id| state.users.get(&id))
                    .map(|u| u.full_name.clone()),
                tenant_name: state.tenants.get(&p.tenant_id).map(|t| t.name.clone()),
            })
            .collect();
        rows.sort_by(|a, b| {
            b.project
                .updated_at
                .cmp(&a.project.updated_at)
                .then_with(|| a.project.id.cmp(&b.project.id))
        });
        Ok(paginate(rows, page))
    }
}
