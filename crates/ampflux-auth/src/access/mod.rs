//! Project access resolution.

pub mod resolver;

pub use resolver::{AccessResolver, AccessRole, ProjectPermissions, ProjectRelation};
