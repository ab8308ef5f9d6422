//! # taskhub-auth
//!
//! Authentication primitives and the authorization policy for TaskHub.
//!
//! ## Modules
//!
//! - `identity`: the authenticated caller as a closed enum
//! - `jwt`: session token claims, signing, and verification
//! - `password`: Argon2id hashing and password policy
//! - `policy`: the single pure authorization decision function

pub mod identity;
pub mod jwt;
pub mod password;
pub mod policy;

pub use identity::{Identity, TenantRole};
pub use jwt::{IssuedToken, JwtDecoder, JwtEncoder, SessionClaims};
pub use password::{PasswordHasher, PasswordValidator};
pub use policy::{AccessDenied, Action, ResourceDescriptor, authorize};
