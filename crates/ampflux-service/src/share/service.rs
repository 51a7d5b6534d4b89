//! Share service — the pending → accepted/rejected invitation state machine.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use ampflux_auth::access::AccessResolver;
use ampflux_core::error::AppError;
use ampflux_core::result::AppResult;
use ampflux_database::repositories::account::AccountRepository;
use ampflux_database::repositories::project::ProjectRepository;
use ampflux_database::repositories::share::ShareRepository;
use ampflux_entity::account::Account;
use ampflux_entity::project::{Project, ProjectRole};
use ampflux_entity::share::{CreateShare, ProjectShare};

use crate::audit::AuditRecorder;
use crate::notify::EmailNotifier;

/// A share joined with its project and inviter summaries.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SharedProject {
    /// The share row.
    pub share: ProjectShare,
    /// The shared project.
    pub project: Project,
    /// Inviter display name.
    pub shared_by_name: String,
    /// Inviter email.
    pub shared_by_email: String,
}

/// Manages the share invitation lifecycle.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Project lookups.
    projects: Arc<ProjectRepository>,
    /// Share persistence.
    shares: Arc<ShareRepository>,
    /// Inviter lookups for listings.
    accounts: Arc<AccountRepository>,
    /// Audit trail.
    audit: AuditRecorder,
    /// Email side channel.
    notifier: Arc<dyn EmailNotifier>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        projects: Arc<ProjectRepository>,
        shares: Arc<ShareRepository>,
        accounts: Arc<AccountRepository>,
        audit: AuditRecorder,
        notifier: Arc<dyn EmailNotifier>,
    ) -> Self {
        Self {
            projects,
            shares,
            accounts,
            audit,
            notifier,
        }
    }

    /// Invite an email address to a project. Manage-gated.
    ///
    /// At most one non-rejected share may exist per `(project, email)`;
    /// violating that is a conflict. The notification email degrades to a
    /// warning log on failure.
    pub async fn create(
        &self,
        account: &Account,
        project_id: Uuid,
        invitee_email: &str,
        role: ProjectRole,
    ) -> AppResult<ProjectShare> {
        let project = self.load_project(project_id).await?;
        AccessResolver::require_manage(account, &project)?;

        if self
            .shares
            .find_open(project_id, invitee_email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Project already shared with this email"));
        }

        let share = self
            .shares
            .create(&CreateShare {
                project_id,
                invited_by: account.id,
                invitee_email: invitee_email.to_string(),
                role,
            })
            .await?;

        self.audit
            .record(
                project_id,
                account.id,
                "share.create",
                Some(json!({"invitee": invitee_email, "role": role})),
            )
            .await;

        if let Err(e) = self
            .notifier
            .send_share_invitation(invitee_email, &project.name, &account.name, role.as_str())
            .await
        {
            warn!(to = invitee_email, error = %e, "Share invitation email failed");
        }

        info!(share_id = %share.id, %project_id, invitee = invitee_email, "Share created");
        Ok(share)
    }

    /// List pending and accepted shares addressed to the caller.
    pub async fn list_shared_with_me(&self, account: &Account) -> AppResult<Vec<SharedProject>> {
        let shares = self.shares.list_for_email(&account.email).await?;
        let mut result = Vec::with_capacity(shares.len());

        for share in shares {
            let Some(project) = self.projects.find_by_id(share.project_id).await? else {
                continue;
            };
            let Some(inviter) = self.accounts.find_by_id(share.invited_by).await? else {
                continue;
            };
            result.push(SharedProject {
                share,
                project,
                shared_by_name: inviter.name,
                shared_by_email: inviter.email,
            });
        }

        Ok(result)
    }

    /// Accept the pending invitation addressed to the caller.
    ///
    /// Materializes a membership row with the invited role (idempotent if a
    /// row already exists) and flips the share to accepted.
    pub async fn accept(&self, account: &Account, project_id: Uuid) -> AppResult<ProjectShare> {
        let share = self
            .shares
            .find_pending(project_id, &account.email)
            .await?
            .ok_or_else(|| AppError::not_found("Share invitation not found"))?;

        let accepted = self.shares.accept(share.id, account.id).await?;

        self.audit
            .record(project_id, account.id, "share.accept", None)
            .await;

        info!(share_id = %accepted.id, %project_id, account_id = %account.id, "Share accepted");
        Ok(accepted)
    }

    /// Decline the pending invitation addressed to the caller.
    ///
    /// A rejected share is terminal and frees the `(project, email)` slot
    /// for a future invitation.
    pub async fn decline(&self, account: &Account, project_id: Uuid) -> AppResult<ProjectShare> {
        let share = self
            .shares
            .find_pending(project_id, &account.email)
            .await?
            .ok_or_else(|| AppError::not_found("Share invitation not found"))?;

        let declined = self.shares.decline(share.id).await?;

        self.audit
            .record(project_id, account.id, "share.decline", None)
            .await;

        info!(share_id = %declined.id, %project_id, account_id = %account.id, "Share declined");
        Ok(declined)
    }

    async fn load_project(&self, project_id: Uuid) -> AppResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))
    }
}
