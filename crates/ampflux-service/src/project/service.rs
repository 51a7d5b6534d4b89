//! Project service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use ampflux_auth::access::{AccessResolver, ProjectPermissions};
use ampflux_core::error::AppError;
use ampflux_core::result::AppResult;
use ampflux_database::repositories::account::AccountRepository;
use ampflux_database::repositories::member::MemberRepository;
use ampflux_database::repositories::project::ProjectRepository;
use ampflux_entity::account::Account;
use ampflux_entity::project::{Project, ProjectMember, ProjectRole};

use crate::audit::AuditRecorder;

/// A membership row joined with the member's account details.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MemberDetails {
    /// The membership row.
    pub member: ProjectMember,
    /// Member display name.
    pub name: String,
    /// Member email.
    pub email: String,
    /// Whether this member owns the project.
    pub is_owner: bool,
}

/// Manages projects and their in-company membership.
#[derive(Debug, Clone)]
pub struct ProjectService {
    /// Project persistence.
    projects: Arc<ProjectRepository>,
    /// Membership persistence.
    members: Arc<MemberRepository>,
    /// Account lookups for member details.
    accounts: Arc<AccountRepository>,
    /// Permission resolution.
    resolver: Arc<AccessResolver>,
    /// Audit trail.
    audit: AuditRecorder,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(
        projects: Arc<ProjectRepository>,
        members: Arc<MemberRepository>,
        accounts: Arc<AccountRepository>,
        resolver: Arc<AccessResolver>,
        audit: AuditRecorder,
    ) -> Self {
        Self {
            projects,
            members,
            accounts,
            resolver,
            audit,
        }
    }

    /// Create a project owned by the caller, who joins as an editor member.
    pub async fn create(&self, account: &Account, name: &str) -> AppResult<Project> {
        let name = name.trim();
        if name.len() < 3 {
            return Err(AppError::validation(
                "Project name must be at least 3 characters",
            ));
        }

        let project = self
            .projects
            .create(name, account.company_id, account.id)
            .await?;

        self.members
            .create(project.id, account.id, ProjectRole::Editor)
            .await?;

        self.audit
            .record(project.id, account.id, "project.create", None)
            .await;

        info!(project_id = %project.id, account_id = %account.id, "Project created");
        Ok(project)
    }

    /// List the caller's dashboard projects, most recently updated first.
    pub async fn list(&self, account: &Account) -> AppResult<Vec<Project>> {
        self.projects
            .list_for_account(account.company_id, account.id)
            .await
    }

    /// Fetch a project the caller can view.
    pub async fn get(&self, account: &Account, project_id: Uuid) -> AppResult<Project> {
        let project = self.load(project_id).await?;
        self.resolver.require_view(account, &project).await?;
        Ok(project)
    }

    /// The caller's effective permission tuple for a project.
    pub async fn permissions(
        &self,
        account: &Account,
        project_id: Uuid,
    ) -> AppResult<(Project, ProjectPermissions)> {
        let project = self.load(project_id).await?;
        let perms = self.resolver.require_view(account, &project).await?;
        Ok((project, perms))
    }

    /// Delete a project. Manage-gated; members, shares, versions,
    /// simulations, and audit entries go with it.
    pub async fn delete(&self, account: &Account, project_id: Uuid) -> AppResult<()> {
        let project = self.load(project_id).await?;
        AccessResolver::require_manage(account, &project)?;

        self.projects.delete(project_id).await?;
        info!(%project_id, account_id = %account.id, "Project deleted");
        Ok(())
    }

    /// Add a same-company account as a project member. Manage-gated.
    pub async fn add_member(
        &self,
        account: &Account,
        project_id: Uuid,
        member_account_id: Uuid,
        role: ProjectRole,
    ) -> AppResult<ProjectMember> {
        let project = self.load(project_id).await?;
        AccessResolver::require_manage(account, &project)?;

        let target = self
            .accounts
            .find_by_id(member_account_id)
            .await?
            .filter(|t| t.company_id == account.company_id)
            .ok_or_else(|| AppError::not_found("Account not found in your company"))?;

        if self.members.find(project_id, target.id).await?.is_some() {
            return Err(AppError::conflict(
                "Account is already a member of this project",
            ));
        }

        let member = self.members.create(project_id, target.id, role).await?;

        self.audit
            .record(
                project_id,
                account.id,
                "member.add",
                Some(json!({"member": target.id, "role": role})),
            )
            .await;

        Ok(member)
    }

    /// Remove a project member. Manage-gated; the owner cannot be removed.
    pub async fn remove_member(
        &self,
        account: &Account,
        project_id: Uuid,
        member_account_id: Uuid,
    ) -> AppResult<()> {
        let project = self.load(project_id).await?;
        AccessResolver::require_manage(account, &project)?;

        if member_account_id == project.owner_id {
            return Err(AppError::validation("Cannot remove the project owner"));
        }

        if !self.members.delete(project_id, member_account_id).await? {
            return Err(AppError::not_found("Member not found"));
        }

        self.audit
            .record(
                project_id,
                account.id,
                "member.remove",
                Some(json!({"member": member_account_id})),
            )
            .await;

        Ok(())
    }

    /// List a project's members with their account details. View-gated.
    pub async fn list_members(
        &self,
        account: &Account,
        project_id: Uuid,
    ) -> AppResult<Vec<MemberDetails>> {
        let project = self.load(project_id).await?;
        self.resolver.require_view(account, &project).await?;

        let members = self.members.list_by_project(project_id).await?;
        let mut details = Vec::with_capacity(members.len());

        for member in members {
            if let Some(acct) = self.accounts.find_by_id(member.account_id).await? {
                details.push(MemberDetails {
                    is_owner: member.account_id == project.owner_id,
                    name: acct.name,
                    email: acct.email,
                    member,
                });
            }
        }

        Ok(details)
    }

    /// Whether the caller may manage (delete/share/member-edit) the project.
    pub fn can_manage(account: &Account, project: &Project) -> bool {
        AccessResolver::can_manage(account, project)
    }

    async fn load(&self, project_id: Uuid) -> AppResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))
    }
}
