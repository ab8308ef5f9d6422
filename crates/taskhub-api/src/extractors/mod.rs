//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod path;
pub mod query;

pub use auth::{AuthUser, ClientIp};
pub use json::ValidatedJson;
pub use path::PathId;
pub use query::QueryParams;
