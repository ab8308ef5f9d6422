//! Authorization policy.
//!
//! Every role, tenant and ownership check in TaskHub goes through
//! [`authorize`]. It performs no I/O; callers resolve the target first and
//! describe it with a [`ResourceDescriptor`].

pub mod action;
pub mod enforcer;

pub use action::{Action, Requirement};
pub use enforcer::{AccessDenied, ResourceDescriptor, authorize};
