//! Session lifecycle flows.

pub mod manager;

pub use manager::{AUTH_FAILED, RegisterParams, SessionManager};
