//! Repository traits and their query filters.
//!
//! Every method returns [`AppResult`](taskhub_core::AppResult). Unique
//! constraint violations surface as [`ErrorKind::Conflict`](taskhub_core::ErrorKind::Conflict);
//! anything else the store reports is an internal database error.

pub mod audit;
pub mod health;
pub mod project;
pub mod task;
pub mod tenant;
pub mod user;

pub use audit::AuditLogRepository;
pub use health::HealthProbe;
pub use project::{ProjectFilter, ProjectRepository};
pub use task::{TaskFilter, TaskRepository};
pub use tenant::{TenantFilter, TenantRepository};
pub use user::{UserFilter, UserRepository};
