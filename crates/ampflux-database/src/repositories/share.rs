//! Project share repository implementation.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use ampflux_core::error::{AppError, ErrorKind};
use ampflux_core::result::AppResult;
use ampflux_entity::project::ProjectMember;
use ampflux_entity::share::{CreateShare, ProjectShare, ShareStatus};

use super::map_insert_err;

/// Repository for share invitation rows and their lifecycle transitions.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a share by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProjectShare>> {
        sqlx::query_as::<_, ProjectShare>("SELECT * FROM project_shares WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// Find the open (non-rejected) share for a `(project, email)` pair.
    pub async fn find_open(&self, project_id: Uuid, email: &str) -> AppResult<Option<ProjectShare>> {
        sqlx::query_as::<_, ProjectShare>(
            "SELECT * FROM project_shares \
             WHERE project_id = $1 AND invitee_email = $2 AND status != 'rejected' \
             ORDER BY CASE status WHEN 'pending' THEN 0 ELSE 1 END \
             LIMIT 1",
        )
        .bind(project_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find open share", e))
    }

    /// Find the pending share for a `(project, email)` pair.
    pub async fn find_pending(
        &self,
        project_id: Uuid,
        email: &str,
    ) -> AppResult<Option<ProjectShare>> {
        sqlx::query_as::<_, ProjectShare>(
            "SELECT * FROM project_shares \
             WHERE project_id = $1 AND invitee_email = $2 AND status = 'pending'",
        )
        .bind(project_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find pending share", e))
    }

    /// List the pending and accepted shares addressed to an email.
    pub async fn list_for_email(&self, email: &str) -> AppResult<Vec<ProjectShare>> {
        sqlx::query_as::<_, ProjectShare>(
            "SELECT s.* FROM project_shares s \
             JOIN projects p ON p.id = s.project_id \
             WHERE s.invitee_email = $1 AND s.status IN ('pending', 'accepted') \
             ORDER BY p.updated_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }

    /// Create a new share invitation.
    ///
    /// The partial unique index on non-rejected `(project, email)` pairs
    /// backs up the service-level duplicate check under races.
    pub async fn create(&self, data: &CreateShare) -> AppResult<ProjectShare> {
        sqlx::query_as::<_, ProjectShare>(
            "INSERT INTO project_shares (project_id, invited_by, invitee_email, role) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.project_id)
        .bind(data.invited_by)
        .bind(&data.invitee_email)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "Project already shared with this email"))
    }

    /// Accept a pending share on behalf of an account.
    ///
    /// Runs in one transaction: the share row is locked, re-checked to still
    /// be pending, a membership row is created if one does not already exist
    /// (check-before-insert keeps acceptance idempotent), and the status is
    /// flipped with the acceptance timestamp and acceptor recorded.
    pub async fn accept(&self, share_id: Uuid, account_id: Uuid) -> AppResult<ProjectShare> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin tx", e))?;

        let share = sqlx::query_as::<_, ProjectShare>(
            "SELECT * FROM project_shares WHERE id = $1 FOR UPDATE",
        )
        .bind(share_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock share", e))?
        .ok_or_else(|| AppError::not_found("Share invitation not found"))?;

        if share.status != ShareStatus::Pending {
            return Err(AppError::not_found("Share invitation not found"));
        }

        let existing = sqlx::query_as::<_, ProjectMember>(
            "SELECT * FROM project_members WHERE project_id = $1 AND account_id = $2",
        )
        .bind(share.project_id)
        .bind(account_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check membership", e))?;

        if existing.is_none() {
            sqlx::query(
                "INSERT INTO project_members (project_id, account_id, role) VALUES ($1, $2, $3)",
            )
            .bind(share.project_id)
            .bind(account_id)
            .bind(share.role)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create membership", e)
            })?;
        }

        let accepted = sqlx::query_as::<_, ProjectShare>(
            "UPDATE project_shares \
             SET status = 'accepted', accepted_at = $2, accepted_by = $3 \
             WHERE id = $1 RETURNING *",
        )
        .bind(share_id)
        .bind(Utc::now())
        .bind(account_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to accept share", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit tx", e))?;

        Ok(accepted)
    }

    /// Decline a pending share.
    pub async fn decline(&self, share_id: Uuid) -> AppResult<ProjectShare> {
        sqlx::query_as::<_, ProjectShare>(
            "UPDATE project_shares SET status = 'rejected' \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(share_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to decline share", e))?
        .ok_or_else(|| AppError::not_found("Share invitation not found"))
    }
}
