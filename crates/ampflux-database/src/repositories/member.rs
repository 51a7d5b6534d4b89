//! Project membership repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ampflux_core::error::{AppError, ErrorKind};
use ampflux_core::result::AppResult;
use ampflux_entity::project::{ProjectMember, ProjectRole};

use super::map_insert_err;

/// Repository for project membership rows.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the membership row for an account on a project.
    pub async fn find(&self, project_id: Uuid, account_id: Uuid) -> AppResult<Option<ProjectMember>> {
        sqlx::query_as::<_, ProjectMember>(
            "SELECT * FROM project_members WHERE project_id = $1 AND account_id = $2",
        )
        .bind(project_id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find member", e))
    }

    /// List all members of a project.
    pub async fn list_by_project(&self, project_id: Uuid) -> AppResult<Vec<ProjectMember>> {
        sqlx::query_as::<_, ProjectMember>(
            "SELECT * FROM project_members WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))
    }

    /// Add a member to a project.
    pub async fn create(
        &self,
        project_id: Uuid,
        account_id: Uuid,
        role: ProjectRole,
    ) -> AppResult<ProjectMember> {
        sqlx::query_as::<_, ProjectMember>(
            "INSERT INTO project_members (project_id, account_id, role) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(project_id)
        .bind(account_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "Account is already a member of this project"))
    }

    /// Remove a member from a project.
    pub async fn delete(&self, project_id: Uuid, account_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM project_members WHERE project_id = $1 AND account_id = $2",
        )
        .bind(project_id)
        .bind(account_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove member", e))?;
        Ok(result.rows_affected() > 0)
    }
}
