//! Projects within a tenant.

pub mod service;

pub use service::{CreateProjectInput, ProjectQuery, ProjectService};
