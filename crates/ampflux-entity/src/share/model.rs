//! Project share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::project::ProjectRole;

use super::status::ShareStatus;

/// A cross-tenant share invitation, keyed by invitee email.
///
/// Distinct from [`crate::project::ProjectMember`]: a share represents
/// not-yet-resolved or externally-granted access. At most one non-rejected
/// share may exist per `(project, invitee_email)` pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectShare {
    /// Unique share identifier.
    pub id: Uuid,
    /// Project being shared.
    pub project_id: Uuid,
    /// Account that created the invitation.
    pub invited_by: Uuid,
    /// Email address the project is shared with.
    pub invitee_email: String,
    /// Requested role for the invitee.
    pub role: ProjectRole,
    /// Invitation lifecycle state.
    pub status: ShareStatus,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
    /// When the invitation was accepted, if it was.
    pub accepted_at: Option<DateTime<Utc>>,
    /// Account that accepted the invitation, if any.
    pub accepted_by: Option<Uuid>,
}

impl ProjectShare {
    /// Whether this share still grants (or will grant) access.
    pub fn is_open(&self) -> bool {
        self.status != ShareStatus::Rejected
    }
}

/// Data required to create a new share invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShare {
    /// Project being shared.
    pub project_id: Uuid,
    /// Inviting account.
    pub invited_by: Uuid,
    /// Invitee email.
    pub invitee_email: String,
    /// Requested role.
    pub role: ProjectRole,
}
