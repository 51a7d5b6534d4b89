//! Project membership join entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::ProjectRole;

/// Grants an account a per-project role — the in-tenant collaboration
/// mechanism. At most one row per `(project, account)` pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectMember {
    /// Unique membership identifier.
    pub id: Uuid,
    /// Project being granted.
    pub project_id: Uuid,
    /// Account receiving the grant.
    pub account_id: Uuid,
    /// Granted role.
    pub role: ProjectRole,
}
