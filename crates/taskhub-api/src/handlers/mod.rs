//! Request handlers, one module per resource.

pub mod auth;
pub mod health;
pub mod project;
pub mod task;
pub mod tenant;
pub mod user;
