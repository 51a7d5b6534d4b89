//! Append-only audit recording.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use ampflux_core::result::AppResult;
use ampflux_database::repositories::audit::AuditLogRepository;
use ampflux_entity::audit::AuditEntry;

/// Records project actions to the append-only audit trail.
///
/// Audit writes are best-effort: a failed insert is logged and never fails
/// the action that triggered it.
#[derive(Debug, Clone)]
pub struct AuditRecorder {
    /// Audit persistence.
    repo: Arc<AuditLogRepository>,
}

impl AuditRecorder {
    /// Creates a new audit recorder.
    pub fn new(repo: Arc<AuditLogRepository>) -> Self {
        Self { repo }
    }

    /// Append one action record.
    pub async fn record(
        &self,
        project_id: Uuid,
        account_id: Uuid,
        action: &str,
        detail: Option<serde_json::Value>,
    ) {
        if let Err(e) = self
            .repo
            .append(project_id, account_id, action, detail.as_ref())
            .await
        {
            warn!(%project_id, %account_id, action, error = %e, "Audit write failed");
        }
    }

    /// List a project's audit entries, newest first.
    pub async fn list(&self, project_id: Uuid) -> AppResult<Vec<AuditEntry>> {
        self.repo.list_by_project(project_id).await
    }
}
