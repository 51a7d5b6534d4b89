//! Project entity, membership, and per-project roles.

pub mod member;
pub mod model;
pub mod role;

pub use member::ProjectMember;
pub use model::Project;
pub use role::ProjectRole;
