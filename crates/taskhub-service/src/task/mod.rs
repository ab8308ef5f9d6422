//! Tasks inside projects.

pub mod service;

pub use service::{CreateTaskInput, TaskQuery, TaskService};
