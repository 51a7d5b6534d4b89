//! Audit log repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ampflux_core::error::{AppError, ErrorKind};
use ampflux_core::result::AppResult;
use ampflux_entity::audit::AuditEntry;

/// Repository for the append-only audit trail. Insert and list only.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one action record.
    pub async fn append(
        &self,
        project_id: Uuid,
        account_id: Uuid,
        action: &str,
        detail: Option<&serde_json::Value>,
    ) -> AppResult<AuditEntry> {
        sqlx::query_as::<_, AuditEntry>(
            "INSERT INTO audit_log (project_id, account_id, action, detail) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(project_id)
        .bind(account_id)
        .bind(action)
        .bind(detail)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append audit entry", e))
    }

    /// List a project's audit entries, newest first.
    pub async fn list_by_project(&self, project_id: Uuid) -> AppResult<Vec<AuditEntry>> {
        sqlx::query_as::<_, AuditEntry>(
            "SELECT * FROM audit_log WHERE project_id = $1 ORDER BY created_at DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list audit entries", e))
    }
}
