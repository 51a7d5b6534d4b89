//! Audit log entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One append-only action record. Written once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Project the action targeted.
    pub project_id: Uuid,
    /// Account that performed the action.
    pub account_id: Uuid,
    /// Action name (e.g. "project.delete", "share.accept").
    pub action: String,
    /// Structured action detail.
    pub detail: Option<serde_json::Value>,
    /// When the action happened.
    pub created_at: DateTime<Utc>,
}
