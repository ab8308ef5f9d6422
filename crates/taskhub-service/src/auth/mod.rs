//! Registration, login, and session identity.

pub mod service;

pub use service::{AuthService, LoginInput, LoginOutcome, RegisterTenantInput};
