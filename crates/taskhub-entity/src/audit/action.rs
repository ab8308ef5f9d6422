//! Audited mutation kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A mutation recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    RegisterTenant,
    UpdateTenant,
    CreateUser,
    UpdateUser,
    DeleteUser,
    CreateProject,
    UpdateProject,
    DeleteProject,
    CreateTask,
    UpdateTask,
    UpdateTaskStatus,
    DeleteTask,
}

impl AuditAction {
    /// The stored action name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegisterTenant => "REGISTER_TENANT",
            Self::UpdateTenant => "UPDATE_TENANT",
            Self::CreateUser => "CREATE_USER",
            Self::UpdateUser => "UPDATE_USER",
            Self::DeleteUser => "DELETE_USER",
            Self::CreateProject => "CREATE_PROJECT",
            Self::UpdateProject => "UPDATE_PROJECT",
            Self::DeleteProject => "DELETE_PROJECT",
            Self::CreateTask => "CREATE_TASK",
            Self::UpdateTask => "UPDATE_TASK",
            Self::UpdateTaskStatus => "UPDATE_TASK_STATUS",
            Self::DeleteTask => "DELETE_TASK",
        }
    }

    /// The entity type the action applies to.
    pub fn entity_type(&self) -> &'static str {
        match self {
            Self::RegisterTenant | Self::UpdateTenant => "tenant",
            Self::CreateUser | Self::UpdateUser | Self::DeleteUser => "user",
            Self::CreateProject | Self::UpdateProject | Self::DeleteProject => "project",
            Self::CreateTask | Self::UpdateTask | Self::UpdateTaskStatus | Self::DeleteTask => {
                "task"
            }
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_stored_name() {
        let json = serde_json::to_string(&AuditAction::UpdateTaskStatus).unwrap();
        assert_eq!(json, format!("\"{}\"", AuditAction::UpdateTaskStatus.as_str()));
        assert_eq!(AuditAction::DeleteUser.entity_type(), "user");
    }
}
