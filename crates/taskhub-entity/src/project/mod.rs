//! Project domain entities.

pub mod model;
pub mod status;

pub use model::{CreateProject, Project, ProjectDetail, ProjectSummary, UpdateProject};
pub use status::ProjectStatus;
