//! Share invitation status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a share invitation.
///
/// Transitions: `pending → accepted` and `pending → rejected`, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ShareStatus {
    /// Invitation sent, not yet resolved by the invitee.
    Pending,
    /// Invitation accepted; access materialized as a membership row.
    Accepted,
    /// Invitation declined; frees the `(project, email)` slot.
    Rejected,
}

impl ShareStatus {
    /// Whether the invitation has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ShareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
