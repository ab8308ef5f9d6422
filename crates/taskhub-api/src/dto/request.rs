//! Request DTOs with validation.
//!
//! Bodies and query strings are camelCase. Field-level checks run through
//! `validator`; rules that need the store (uniqueness, quotas, tenant
//! membership) live in the services.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use validator::Validate;

use taskhub_core::types::{PageRequest, TenantId, UserId};
use taskhub_entity::project::{ProjectStatus, UpdateProject};
use taskhub_entity::task::{TaskPriority, TaskStatus, UpdateTask};
use taskhub_entity::tenant::{SubscriptionPlan, TenantStatus, UpdateTenant};
use taskhub_entity::user::{UpdateUser, UserRole};
use taskhub_service::{
    AddUserInput, CreateProjectInput, CreateTaskInput, LoginInput, ProjectQuery,
    RegisterTenantInput, TaskQuery, UserQuery,
};

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTenantRequest {
    #[validate(length(min = 1, max = 255, message = "Tenant name is required"))]
    pub tenant_name: String,
    #[validate(length(min = 1, max = 63, message = "Subdomain must be 1-63 characters"))]
    pub subdomain: String,
    pub subscription_plan: Option<SubscriptionPlan>,
    #[validate(email(message = "A valid email is required"))]
    pub admin_email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub admin_password: String,
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub admin_full_name: String,
}

impl From<RegisterTenantRequest> for RegisterTenantInput {
    fn from(req: RegisterTenantRequest) -> Self {
        Self {
            tenant_name: req.tenant_name,
            subdomain: req.subdomain,
            subscription_plan: req.subscription_plan,
            admin_email: req.admin_email,
            admin_password: req.admin_password,
            admin_full_name: req.admin_full_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub tenant_subdomain: Option<String>,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            tenant_subdomain: req.tenant_subdomain,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenantRequest {
    #[validate(length(min = 1, max = 255, message = "Tenant name must not be empty"))]
    pub name: Option<String>,
    pub status: Option<TenantStatus>,
    pub subscription_plan: Option<SubscriptionPlan>,
    #[validate(range(min = 1, message = "maxUsers must be at least 1"))]
    pub max_users: Option<i32>,
    #[validate(range(min = 0, message = "maxProjects must not be negative"))]
    pub max_projects: Option<i32>,
}

impl From<UpdateTenantRequest> for UpdateTenant {
    fn from(req: UpdateTenantRequest) -> Self {
        Self {
            name: req.name,
            status: req.status,
            subscription_plan: req.subscription_plan,
            max_users: req.max_users,
            max_projects: req.max_projects,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,
    pub role: Option<UserRole>,
}

impl From<AddUserRequest> for AddUserInput {
    fn from(req: AddUserRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
            role: req.role,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Full name must not be empty"))]
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            full_name: req.full_name,
            role: req.role,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Project name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub target_tenant_id: Option<TenantId>,
}

impl From<CreateProjectRequest> for CreateProjectInput {
    fn from(req: CreateProjectRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            status: req.status,
            target_tenant_id: req.target_tenant_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Project name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl From<UpdateProjectRequest> for UpdateProject {
    fn from(req: UpdateProjectRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            status: req.status,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<UserId>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
}

impl From<CreateTaskRequest> for CreateTaskInput {
    fn from(req: CreateTaskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            assigned_to: req.assigned_to,
            priority: req.priority,
            status: req.status,
            due_date: req.due_date,
        }
    }
}

/// Full task update. `assignedTo` and `dueDate` may be set to `null` to
/// clear them.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<UserId>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,
}

impl From<UpdateTaskRequest> for UpdateTask {
    fn from(req: UpdateTaskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            assigned_to: req.assigned_to,
            priority: req.priority,
            status: req.status,
            due_date: req.due_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

/// `?page&limit&search` on the tenant list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenantListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
}

impl TenantListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub role: Option<UserRole>,
}

impl UserListParams {
    pub fn split(self) -> (UserQuery, PageRequest) {
        (
            UserQuery {
                search: self.search,
                role: self.role,
            },
            PageRequest::new(self.page, self.limit),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub status: Option<ProjectStatus>,
    pub tenant_id: Option<TenantId>,
}

impl ProjectListParams {
    pub fn split(self) -> (ProjectQuery, PageRequest) {
        (
            ProjectQuery {
                search: self.search,
                status: self.status,
                tenant_id: self.tenant_id,
            },
            PageRequest::new(self.page, self.limit),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<UserId>,
    pub search: Option<String>,
}

impl TaskListParams {
    pub fn split(self) -> (TaskQuery, PageRequest) {
        (
            TaskQuery {
                status: self.status,
                priority: self.priority,
                assigned_to: self.assigned_to,
                search: self.search,
            },
            PageRequest::new(self.page, self.limit),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_task_distinguishes_null_from_absent() {
        let cleared: UpdateTaskRequest =
            serde_json::from_value(serde_json::json!({"assignedTo": null})).unwrap();
        assert_eq!(cleared.assigned_to, Some(None));
        assert_eq!(cleared.due_date, None);

        let set: UpdateTaskRequest =
            serde_json::from_value(serde_json::json!({"dueDate": "2024-05-01"})).unwrap();
        assert_eq!(
            set.due_date,
            Some(Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()))
        );
    }

    #[test]
    fn test_register_request_validation() {
        let req: RegisterTenantRequest = serde_json::from_value(serde_json::json!({
            "tenantName": "Acme",
            "subdomain": "acme",
            "adminEmail": "not-an-email",
            "adminPassword": "secret123",
            "adminFullName": "Ann"
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn test_list_params_clamp() {
        let params = TaskListParams {
            limit: Some(1_000),
            ..Default::default()
        };
        let (_, page) = params.split();
        assert_eq!(page.limit, 100);
        assert_eq!(page.page, 1);
    }
}
