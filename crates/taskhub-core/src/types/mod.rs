//! Shared value types used across crates.

pub mod id;
pub mod pagination;

pub use self::id::{AuditLogId, ProjectId, TaskId, TenantId, UserId};
pub use self::pagination::{PageRequest, PageResponse};
