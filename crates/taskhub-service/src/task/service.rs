//! Task service.
//!
//! A task belongs to its project's tenant, and its owner for authorization
//! purposes is the project's creator. Any member of the tenant may move a
//! task between statuses; full edits and deletion follow the project.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use taskhub_auth::{Action, ResourceDescriptor, authorize};
use taskhub_core::error::AppError;
use taskhub_core::types::{PageRequest, PageResponse, ProjectId, TaskId, TenantId, UserId};
use taskhub_database::repositories::{
    ProjectRepository, TaskFilter, TaskRepository, UserRepository,
};
use taskhub_entity::audit::AuditAction;
use taskhub_entity::project::Project;
use taskhub_entity::task::{CreateTask, Task, TaskPriority, TaskStatus, TaskView, UpdateTask};

use crate::audit::AuditRecorder;
use crate::context::RequestContext;
use crate::input::required;

/// A new task.
#[derive(Debug, Clone, Default)]
pub struct CreateTaskInput {
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<UserId>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
}

/// Filters for the task list of one project.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<UserId>,
    pub search: Option<String>,
}

#[derive(Clone)]
pub struct TaskService {
    projects: Arc<dyn ProjectRepository>,
    tasks: Arc<dyn TaskRepository>,
    users: Arc<dyn UserRepository>,
    audit: AuditRecorder,
}

impl TaskService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        tasks: Arc<dyn TaskRepository>,
        users: Arc<dyn UserRepository>,
        audit: AuditRecorder,
    ) -> Self {
        Self {
            projects,
            tasks,
            users,
            audit,
        }
    }

    async fn resolve_project(&self, id: ProjectId) -> Result<Project, AppError> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))
    }

    async fn resolve(&self, id: TaskId) -> Result<Task, AppError> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Task not found"))
    }

    /// The task's tenant and owner (the parent project's creator).
    async fn descriptor(&self, task: &Task) -> Result<ResourceDescriptor, AppError> {
        let owner = self
            .projects
            .find_by_id(task.project_id)
            .await?
            .and_then(|p| p.created_by);
        Ok(ResourceDescriptor::owned(task.tenant_id, owner))
    }

    async fn check_assignee(&self, tenant_id: TenantId, assignee: UserId) -> Result<(), AppError> {
        let user = self.users.find_by_id(assignee).await?;
        match user {
            Some(user) if user.tenant_id == Some(tenant_id) => Ok(()),
            _ => Err(AppError::validation(
                "Assigned user must be a member of the project's tenant",
            )),
        }
    }

    /// Create a task under `project_id`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        input: CreateTaskInput,
    ) -> Result<Task, AppError> {
        let project = self.resolve_project(project_id).await?;
        authorize(
            &ctx.identity,
            Action::CreateTask,
            &ResourceDescriptor::in_tenant(project.tenant_id),
        )
        .map_err(|d| d.for_entity("Project"))?;

        let title = required("Title", &input.title)?;
        if let Some(assignee) = input.assigned_to {
            self.check_assignee(project.tenant_id, assignee).await?;
        }

        let task = self
            .tasks
            .create(CreateTask {
                tenant_id: project.tenant_id,
                project_id: project.id,
                title,
                description: input.description,
                assigned_to: input.assigned_to,
                priority: input.priority.unwrap_or_default(),
                status: input.status.unwrap_or_default(),
                due_date: input.due_date,
            })
            .await?;

        self.audit
            .record(ctx, Some(task.tenant_id), AuditAction::CreateTask, task.id)
            .await;
        info!(
            task_id = %task.id,
            project_id = %project.id,
            tenant_id = %task.tenant_id,
            "Task created"
        );
        Ok(task)
    }

    /// Tasks of a project, highest priority first, then by due date.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        query: TaskQuery,
        page: PageRequest,
    ) -> Result<PageResponse<TaskView>, AppError> {
        let project = self.resolve_project(project_id).await?;
        authorize(
            &ctx.identity,
            Action::ListTasks,
            &ResourceDescriptor::in_tenant(project.tenant_id),
        )
        .map_err(|d| d.for_entity("Project"))?;

        let filter = TaskFilter {
            project_id: project.id,
            status: query.status,
            priority: query.priority,
            assigned_to: query.assigned_to,
            search: query.search,
        };
        self.tasks.list(&filter, page).await
    }

    /// Move a task to `status`. Open to every member of the tenant; every
    /// call is audited even when the status does not change.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<Task, AppError> {
        let mut task = self.resolve(id).await?;
        authorize(
            &ctx.identity,
            Action::UpdateTaskStatus,
            &ResourceDescriptor::in_tenant(task.tenant_id),
        )
        .map_err(|d| d.for_entity("Task"))?;

        task.status = status;
        let task = self.tasks.update(&task).await?;

        self.audit
            .record(ctx, Some(task.tenant_id), AuditAction::UpdateTaskStatus, task.id)
            .await;
        info!(task_id = %task.id, status = %task.status, "Task status updated");
        Ok(task)
    }

    /// Full update. Project creator or tenant admin.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        mut changes: UpdateTask,
    ) -> Result<Task, AppError> {
        let mut task = self.resolve(id).await?;
        let resource = self.descriptor(&task).await?;
        authorize(&ctx.identity, Action::UpdateTask, &resource)
            .map_err(|d| d.for_entity("Task"))?;

        if let Some(title) = changes.title.take() {
            changes.title = Some(required("Title", &title)?);
        }
        if let Some(Some(assignee)) = changes.assigned_to {
            self.check_assignee(task.tenant_id, assignee).await?;
        }

        changes.apply(&mut task);
        let task = self.tasks.update(&task).await?;

        self.audit
            .record(ctx, Some(task.tenant_id), AuditAction::UpdateTask, task.id)
            .await;
        info!(task_id = %task.id, user_id = %ctx.user_id(), "Task updated");
        Ok(task)
    }

    /// Delete a task. Project creator or tenant admin.
    pub async fn delete(&self, ctx: &RequestContext, id: TaskId) -> Result<(), AppError> {
        let task = self.resolve(id).await?;
        let resource = self.descriptor(&task).await?;
        authorize(&ctx.identity, Action::DeleteTask, &resource)
            .map_err(|d| d.for_entity("Task"))?;

        if !self.tasks.delete(task.id).await? {
            return Err(AppError::not_found("Task not found"));
        }

        self.audit
            .record(ctx, Some(task.tenant_id), AuditAction::DeleteTask, task.id)
            .await;
        info!(task_id = %task.id, project_id = %task.project_id, "Task deleted");
        Ok(())
    }
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use taskhub_core::ErrorKind;
    use taskhub_entity::tenant::SubscriptionPlan;
    use taskhub_entity::user::User;

    use super::*;
    use crate::project::CreateProjectInput;
    use crate::testing::TestEnv;

    struct Fixture {
        env: TestEnv,
        admin: User,
        owner: User,
        other: User,
        project: Project,
    }

    async fn fixture() -> Fixture {
        let env = TestEnv::new();
        let (acme, admin) = env.register("Acme", "acme", SubscriptionPlan::Pro).await;
        let owner = env.add_member(&admin, acme.id, "owen").await;
        let other = env.add_member(&admin, acme.id, "olga").await;
        let project = env
            .projects
            .create(
                &env.ctx_for(&owner),
                CreateProjectInput {
                    name: "Launch".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        Fixture {
            env,
            admin,
            owner,
            other,
            project,
        }
    }

    fn titled(title: &str) -> CreateTaskInput {
        CreateTaskInput {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_defaults_and_tenant_from_project() {
        let f = fixture().await;
        let task = f
            .env
            .tasks
            .create(&f.env.ctx_for(&f.other), f.project.id, titled("Write copy"))
            .await
            .unwrap();
        assert_eq!(task.tenant_id, f.project.tenant_id);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.status, TaskStatus::Todo);

        let detail = f
            .env
            .projects
            .get(&f.env.ctx_for(&f.owner), f.project.id)
            .await
            .unwrap();
        assert_eq!(detail.tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_assignee_must_belong_to_project_tenant() {
        let f = fixture().await;
        let (_, stranger) = f
            .env
            .register("Globex", "globex", SubscriptionPlan::Free)
            .await;
        let ctx = f.env.ctx_for(&f.owner);

        let mut input = titled("Review");
        input.assigned_to = Some(stranger.id);
        let err = f.env.tasks.create(&ctx, f.project.id, input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let mut input = titled("Review");
        input.assigned_to = Some(f.other.id);
        let task = f.env.tasks.create(&ctx, f.project.id, input).await.unwrap();
        assert_eq!(task.assigned_to, Some(f.other.id));

        let err = f
            .env
            .tasks
            .update(
                &ctx,
                task.id,
                UpdateTask {
                    assigned_to: Some(Some(stranger.id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let cleared = f
            .env
            .tasks
            .update(
                &ctx,
                task.id,
                UpdateTask {
                    assigned_to: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.assigned_to, None);
    }

    #[tokio::test]
    async fn test_status_patch_twice_is_audited_twice() {
        let f = fixture().await;
        let task = f
            .env
            .tasks
            .create(&f.env.ctx_for(&f.owner), f.project.id, titled("Ship"))
            .await
            .unwrap();
        let ctx = f.env.ctx_for(&f.other);

        let first = f
            .env
            .tasks
            .update_status(&ctx, task.id, TaskStatus::Completed)
            .await
            .unwrap();
        let second = f
            .env
            .tasks
            .update_status(&ctx, task.id, TaskStatus::Completed)
            .await
            .unwrap();
        assert_eq!(first.status, TaskStatus::Completed);
        assert_eq!(second.status, TaskStatus::Completed);

        let status_entries = f
            .env
            .audit_for(task.id)
            .await
            .into_iter()
            .filter(|e| e.action == AuditAction::UpdateTaskStatus.as_str())
            .count();
        assert_eq!(status_entries, 2);
    }

    #[tokio::test]
    async fn test_full_update_and_delete_follow_project_owner() {
        let f = fixture().await;
        let task = f
            .env
            .tasks
            .create(&f.env.ctx_for(&f.other), f.project.id, titled("Draft"))
            .await
            .unwrap();

        let change = UpdateTask {
            priority: Some(TaskPriority::High),
            ..Default::default()
        };
        let err = f
            .env
            .tasks
            .update(&f.env.ctx_for(&f.other), task.id, change.clone())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let updated = f
            .env
            .tasks
            .update(&f.env.ctx_for(&f.owner), task.id, change)
            .await
            .unwrap();
        assert_eq!(updated.priority, TaskPriority::High);

        let err = f
            .env
            .tasks
            .delete(&f.env.ctx_for(&f.other), task.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        f.env
            .tasks
            .delete(&f.env.ctx_for(&f.admin), task.id)
            .await
            .unwrap();
        let err = f
            .env
            .tasks
            .update_status(&f.env.ctx_for(&f.owner), task.id, TaskStatus::Todo)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_filters_and_order() {
        let f = fixture().await;
        let ctx = f.env.ctx_for(&f.owner);
        for (title, priority, assignee) in [
            ("low", TaskPriority::Low, None),
            ("high", TaskPriority::High, Some(f.other.id)),
            ("medium", TaskPriority::Medium, None),
        ] {
            let input = CreateTaskInput {
                title: title.into(),
                priority: Some(priority),
                assigned_to: assignee,
                ..Default::default()
            };
            f.env.tasks.create(&ctx, f.project.id, input).await.unwrap();
        }

        let page = f
            .env
            .tasks
            .list(&ctx, f.project.id, TaskQuery::default(), PageRequest::default())
            .await
            .unwrap();
        let titles: Vec<_> = page.items.iter().map(|v| v.task.title.as_str()).collect();
        assert_eq!(titles, ["high", "medium", "low"]);
        assert_eq!(
            page.items[0].assignee.as_ref().map(|a| a.id),
            Some(f.other.id)
        );

        let mine = f
            .env
            .tasks
            .list(
                &ctx,
                f.project.id,
                TaskQuery {
                    assigned_to: Some(f.other.id),
                    ..Default::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(mine.total_items, 1);
    }

    #[tokio::test]
    async fn test_outsider_gets_not_found() {
        let f = fixture().await;
        let (_, outsider) = f
            .env
            .register("Globex", "globex", SubscriptionPlan::Free)
            .await;
        let task = f
            .env
            .tasks
            .create(&f.env.ctx_for(&f.owner), f.project.id, titled("Hidden"))
            .await
            .unwrap();
        let ctx = f.env.ctx_for(&outsider);

        let err = f
            .env
            .tasks
            .list(&ctx, f.project.id, TaskQuery::default(), PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = f
            .env
            .tasks
            .update_status(&ctx, task.id, TaskStatus::Completed)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = f
            .env
            .tasks
            .create(&ctx, f.project.id, titled("Sneaky"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
