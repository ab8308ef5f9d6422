//! Actions subject to authorization and what each one requires.

use std::fmt;

/// An operation a caller attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ListTenants,
    ViewTenant,
    /// Rename a tenant.
    UpdateTenantName,
    /// Change status, plan or quotas of a tenant.
    UpdateTenantSettings,

    CreateUser,
    ListUsers,
    /// Change a user's display name.
    UpdateUserProfile,
    /// Change a user's role or active flag.
    UpdateUserAccess,
    DeleteUser,

    CreateProject,
    ListProjects,
    ViewProject,
    UpdateProject,
    DeleteProject,

    CreateTask,
    ListTasks,
    UpdateTaskStatus,
    UpdateTask,
    DeleteTask,
}

/// The privilege an action demands from a tenant member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Only the super-admin.
    SuperAdmin,
    /// A tenant admin of the resource's tenant.
    TenantAdmin,
    /// The resource's owner or a tenant admin.
    OwnerOrAdmin,
    /// The targeted user themself or a tenant admin.
    SelfOrAdmin,
    /// Any member of the resource's tenant.
    Member,
}

impl Action {
    pub fn requirement(&self) -> Requirement {
        match self {
            Self::ListTenants | Self::UpdateTenantSettings => Requirement::SuperAdmin,
            Self::UpdateTenantName
            | Self::CreateUser
            | Self::DeleteUser
            | Self::UpdateUserAccess => Requirement::TenantAdmin,
            Self::UpdateProject | Self::DeleteProject | Self::UpdateTask | Self::DeleteTask => {
                Requirement::OwnerOrAdmin
            }
            Self::UpdateUserProfile => Requirement::SelfOrAdmin,
            Self::ViewTenant
            | Self::ListUsers
            | Self::CreateProject
            | Self::ListProjects
            | Self::ViewProject
            | Self::CreateTask
            | Self::ListTasks
            | Self::UpdateTaskStatus => Requirement::Member,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
