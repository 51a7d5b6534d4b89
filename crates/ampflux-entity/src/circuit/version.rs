//! Circuit version entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable snapshot of a project's circuit JSON.
///
/// Version numbers are gapless positive integers per project, starting at 1
/// and assigned under the project's row lock at write time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CircuitVersion {
    /// Unique version identifier.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Uuid,
    /// Strictly increasing per-project version number.
    pub version_number: i32,
    /// Circuit diagram snapshot.
    pub data_json: serde_json::Value,
    /// Account that saved the version.
    pub created_by: Uuid,
    /// When the version was saved.
    pub created_at: DateTime<Utc>,
}
