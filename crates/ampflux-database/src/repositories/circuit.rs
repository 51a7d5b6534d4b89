//! Circuit version repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ampflux_core::error::{AppError, ErrorKind};
use ampflux_core::result::AppResult;
use ampflux_entity::circuit::CircuitVersion;

/// Repository for immutable circuit version snapshots.
#[derive(Debug, Clone)]
pub struct CircuitVersionRepository {
    pool: PgPool,
}

impl CircuitVersionRepository {
    /// Create a new circuit version repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the next version for a project.
    ///
    /// The transaction takes a row lock on the project before reading the
    /// current maximum, so concurrent saves to the same project serialize and
    /// the assigned numbers stay gapless. Saves to other projects are
    /// unaffected.
    pub async fn save_version(
        &self,
        project_id: Uuid,
        data_json: &serde_json::Value,
        created_by: Uuid,
    ) -> AppResult<CircuitVersion> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin tx", e))?;

        let locked: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
                .bind(project_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock project", e)
                })?;

        if locked.is_none() {
            return Err(AppError::not_found("Project not found"));
        }

        let next_number: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(version_number), 0) + 1 FROM circuit_versions \
             WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute version number", e)
        })?;

        let version = sqlx::query_as::<_, CircuitVersion>(
            "INSERT INTO circuit_versions (project_id, version_number, data_json, created_by) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(project_id)
        .bind(next_number)
        .bind(data_json)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert version", e))?;

        sqlx::query("UPDATE projects SET updated_at = NOW() WHERE id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to touch project", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit tx", e))?;

        Ok(version)
    }

    /// List a project's versions, newest first.
    pub async fn list_by_project(&self, project_id: Uuid) -> AppResult<Vec<CircuitVersion>> {
        sqlx::query_as::<_, CircuitVersion>(
            "SELECT * FROM circuit_versions WHERE project_id = $1 ORDER BY version_number DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))
    }
}
