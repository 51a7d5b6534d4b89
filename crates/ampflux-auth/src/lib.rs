//! Authentication and authorization for AmpFlux.
//!
//! Credential storage (Argon2id), the JWT token service with its injected
//! revocation list, the session lifecycle manager (register, login, refresh,
//! logout), and the project access resolver.

pub mod access;
pub mod jwt;
pub mod password;
pub mod revocation;
pub mod session;
