//! Simulation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A submitted simulation run for a project.
///
/// Written once as a pending placeholder referencing the dispatched task;
/// live status is served from the task backend via the poll endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Simulation {
    /// Unique simulation identifier.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Uuid,
    /// Dispatched task (job) identifier, used for polling.
    pub task_id: Uuid,
    /// Result payload as recorded at submission time.
    pub result_json: serde_json::Value,
    /// Account that submitted the simulation.
    pub created_by: Uuid,
    /// When the simulation was submitted.
    pub created_at: DateTime<Utc>,
}
