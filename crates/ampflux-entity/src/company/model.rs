//! Company entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A company — the tenant boundary grouping accounts and projects.
///
/// Created implicitly on first registration under a given name; name
/// collisions are resolved at registration time by suffixing a random token.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    /// Unique company identifier.
    pub id: Uuid,
    /// Unique company name.
    pub name: String,
    /// When the company was created.
    pub created_at: DateTime<Utc>,
}
