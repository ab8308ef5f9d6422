//! # taskhub-service
//!
//! Business logic for TaskHub. Every tenant-scoped operation follows the
//! same pipeline: resolve the target, describe it, authorize through the
//! policy, check quota (creates only), persist, then audit.
//!
//! Services follow constructor injection; repositories arrive as
//! `Arc<dyn …Repository>` trait objects.

pub mod audit;
pub mod auth;
pub mod context;
mod input;
pub mod project;
mod services;
pub mod task;
pub mod tenant;
pub mod user;

#[cfg(test)]
mod testing;

pub use audit::AuditRecorder;
pub use auth::{AuthService, LoginInput, LoginOutcome, RegisterTenantInput};
pub use context::RequestContext;
pub use project::{CreateProjectInput, ProjectQuery, ProjectService};
pub use services::Services;
pub use task::{CreateTaskInput, TaskQuery, TaskService};
pub use tenant::TenantService;
pub use user::{AddUserInput, UserQuery, UserService};
