//! Tenant user management.

pub mod service;

pub use service::{AddUserInput, UserQuery, UserService};
