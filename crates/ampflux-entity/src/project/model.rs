//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A circuit design project, owned by exactly one company and one account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: Uuid,
    /// Project name.
    pub name: String,
    /// Owning company (tenant boundary).
    pub company_id: Uuid,
    /// Owning account within the company.
    pub owner_id: Uuid,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// Bumped on every content-mutating action; drives recency ordering.
    pub updated_at: DateTime<Utc>,
}
