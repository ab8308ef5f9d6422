//! # taskhub-entity
//!
//! Domain entity models for TaskHub. Every struct in this crate is either a
//! database row, a write payload handed to a repository, or a read model
//! assembled for list and detail views. Rows derive `sqlx::FromRow` and
//! serialize with camelCase field names.

pub mod audit;
pub mod project;
pub mod task;
pub mod tenant;
pub mod user;
