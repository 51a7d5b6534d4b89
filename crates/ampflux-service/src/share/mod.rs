//! Cross-tenant sharing lifecycle.

pub mod service;

pub use service::{ShareService, SharedProject};
