//! Session token claims, signing, and verification.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::SessionClaims;
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};
