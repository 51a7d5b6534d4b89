//! Simulation record repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ampflux_core::error::{AppError, ErrorKind};
use ampflux_core::result::AppResult;
use ampflux_entity::simulation::Simulation;

/// Repository for simulation placeholder records.
#[derive(Debug, Clone)]
pub struct SimulationRepository {
    pool: PgPool,
}

impl SimulationRepository {
    /// Create a new simulation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a submitted simulation with its pending placeholder payload.
    pub async fn create(
        &self,
        project_id: Uuid,
        task_id: Uuid,
        result_json: &serde_json::Value,
        created_by: Uuid,
    ) -> AppResult<Simulation> {
        sqlx::query_as::<_, Simulation>(
            "INSERT INTO simulations (project_id, task_id, result_json, created_by) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(project_id)
        .bind(task_id)
        .bind(result_json)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create simulation", e))
    }

    /// List a project's simulations, newest first.
    pub async fn list_by_project(&self, project_id: Uuid) -> AppResult<Vec<Simulation>> {
        sqlx::query_as::<_, Simulation>(
            "SELECT * FROM simulations WHERE project_id = $1 ORDER BY created_at DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list simulations", e))
    }
}
