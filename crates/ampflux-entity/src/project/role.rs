//! Per-project role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role granted on a single project, by membership or by share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    /// Read-only access.
    Viewer,
    /// Read and write access.
    Editor,
}

impl ProjectRole {
    /// Whether this role allows content mutation.
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Editor)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
        }
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
