//! Project repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ampflux_core::error::{AppError, ErrorKind};
use ampflux_core::result::AppResult;
use ampflux_entity::project::Project;

/// Repository for project CRUD and listing.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a project by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    /// Create a new project.
    pub async fn create(&self, name: &str, company_id: Uuid, owner_id: Uuid) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (name, company_id, owner_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(company_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create project", e))
    }

    /// List the projects visible on an account's dashboard: every project of
    /// the account's company plus projects where the account holds a
    /// membership row, most recently updated first.
    pub async fn list_for_account(
        &self,
        company_id: Uuid,
        account_id: Uuid,
    ) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>(
            "SELECT DISTINCT p.* FROM projects p \
             LEFT JOIN project_members m ON m.project_id = p.id \
             WHERE p.company_id = $1 OR m.account_id = $2 \
             ORDER BY p.updated_at DESC",
        )
        .bind(company_id)
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))
    }

    /// Bump the project's `updated_at` after a content-mutating action.
    pub async fn touch(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE projects SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to touch project", e))?;
        Ok(())
    }

    /// Delete a project. Dependent rows (members, shares, versions,
    /// simulations, audit entries) are removed by `ON DELETE CASCADE`.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete project", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
