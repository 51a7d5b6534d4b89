//! Project CRUD and membership management.

pub mod service;

pub use service::{MemberDetails, ProjectService};
