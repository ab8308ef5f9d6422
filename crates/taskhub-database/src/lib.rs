//! # taskhub-database
//!
//! Persistence for TaskHub. Services depend only on the repository traits
//! in [`repositories`]; two implementations exist, PostgreSQL through sqlx
//! and a process-local in-memory store. [`Repositories`] bundles one full
//! set of trait objects for injection.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod registry;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use registry::Repositories;
