//! Task domain entities.

pub mod model;
pub mod priority;
pub mod status;

pub use model::{AssigneeInfo, CreateTask, Task, TaskView, UpdateTask};
pub use priority::TaskPriority;
pub use status::TaskStatus;
