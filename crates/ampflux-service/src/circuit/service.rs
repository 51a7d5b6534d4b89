//! Circuit version service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use ampflux_auth::access::AccessResolver;
use ampflux_core::error::AppError;
use ampflux_core::result::AppResult;
use ampflux_database::repositories::circuit::CircuitVersionRepository;
use ampflux_database::repositories::project::ProjectRepository;
use ampflux_entity::account::Account;
use ampflux_entity::circuit::CircuitVersion;
use ampflux_entity::project::Project;

use crate::audit::AuditRecorder;

/// Manages immutable circuit version snapshots.
#[derive(Debug, Clone)]
pub struct CircuitService {
    /// Project lookups.
    projects: Arc<ProjectRepository>,
    /// Version persistence.
    versions: Arc<CircuitVersionRepository>,
    /// Permission resolution.
    resolver: Arc<AccessResolver>,
    /// Audit trail.
    audit: AuditRecorder,
}

impl CircuitService {
    /// Creates a new circuit service.
    pub fn new(
        projects: Arc<ProjectRepository>,
        versions: Arc<CircuitVersionRepository>,
        resolver: Arc<AccessResolver>,
        audit: AuditRecorder,
    ) -> Self {
        Self {
            projects,
            versions,
            resolver,
            audit,
        }
    }

    /// Save the next circuit version. Edit-gated.
    ///
    /// Version numbers are assigned under the project's row lock, so
    /// concurrent saves serialize per project and the sequence stays
    /// gapless. The project's `updated_at` is bumped in the same
    /// transaction.
    pub async fn save_version(
        &self,
        account: &Account,
        project_id: Uuid,
        data_json: serde_json::Value,
    ) -> AppResult<CircuitVersion> {
        let project = self.load(project_id).await?;
        self.resolver.require_edit(account, &project).await?;

        if !data_json.is_object() {
            return Err(AppError::validation(
                "Circuit data must be a JSON object",
            ));
        }

        let version = self
            .versions
            .save_version(project_id, &data_json, account.id)
            .await?;

        self.audit
            .record(
                project_id,
                account.id,
                "version.save",
                Some(json!({"version_number": version.version_number})),
            )
            .await;

        info!(
            %project_id,
            version = version.version_number,
            account_id = %account.id,
            "Circuit version saved"
        );
        Ok(version)
    }

    /// List a project's versions, newest first. View-gated.
    pub async fn list_versions(
        &self,
        account: &Account,
        project_id: Uuid,
    ) -> AppResult<Vec<CircuitVersion>> {
        let project = self.load(project_id).await?;
        self.resolver.require_view(account, &project).await?;
        self.versions.list_by_project(project_id).await
    }

    async fn load(&self, project_id: Uuid) -> AppResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))
    }
}
