//! Effective project permission resolver.
//!
//! Resolution order, first match wins:
//! 1. Same-company relationship — company membership is full trust.
//! 2. Explicit membership row — view always, edit iff editor.
//! 3. Pending external share matching the account's email.
//! 4. Accepted external share.
//! 5. No relation.
//!
//! The decision core is [`ProjectRelation::resolve`], a pure function over
//! pre-fetched rows; [`AccessResolver`] wraps it with the row lookups.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ampflux_core::error::AppError;
use ampflux_core::result::AppResult;
use ampflux_database::repositories::member::MemberRepository;
use ampflux_database::repositories::share::ShareRepository;
use ampflux_entity::account::Account;
use ampflux_entity::project::{Project, ProjectMember, ProjectRole};
use ampflux_entity::share::{ProjectShare, ShareStatus};

/// How an account relates to a project, tagged by grant source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRelation {
    /// Account belongs to the project's company.
    Company,
    /// Account holds an explicit membership row.
    Member(ProjectRole),
    /// Account is addressed by a share invitation.
    Share {
        /// Role requested by the invitation.
        role: ProjectRole,
        /// Invitation state (pending or accepted; rejected never grants).
        status: ShareStatus,
    },
    /// No relation — no access.
    None,
}

/// Role reported in the effective permission tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRole {
    /// Company-level full trust.
    Owner,
    /// Write access via membership or share.
    Editor,
    /// Read-only access via membership or share.
    Viewer,
}

/// Effective permission tuple for an account on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPermissions {
    /// Whether the account may read the project.
    pub can_view: bool,
    /// Whether the account may mutate project content.
    pub can_edit: bool,
    /// The granted role, if any.
    pub role: Option<AccessRole>,
}

impl ProjectPermissions {
    /// The all-false tuple for unrelated accounts.
    pub fn none() -> Self {
        Self {
            can_view: false,
            can_edit: false,
            role: None,
        }
    }
}

impl ProjectRelation {
    /// Resolve the relation from pre-fetched rows, in strict priority order.
    ///
    /// `member` is the account's membership row for the project, if any;
    /// `share` is the best non-rejected share addressed to the account's
    /// email (pending preferred over accepted). Rows for other accounts or
    /// projects must not be passed in.
    pub fn resolve(
        account: &Account,
        project: &Project,
        member: Option<&ProjectMember>,
        share: Option<&ProjectShare>,
    ) -> Self {
        if project.company_id == account.company_id {
            return Self::Company;
        }

        if let Some(member) = member {
            return Self::Member(member.role);
        }

        if let Some(share) = share {
            if share.status != ShareStatus::Rejected {
                return Self::Share {
                    role: share.role,
                    status: share.status,
                };
            }
        }

        Self::None
    }

    /// Derive the effective permission tuple from the relation.
    pub fn permissions(&self) -> ProjectPermissions {
        match self {
            Self::Company => ProjectPermissions {
                can_view: true,
                can_edit: true,
                role: Some(AccessRole::Owner),
            },
            Self::Member(role) | Self::Share { role, .. } => ProjectPermissions {
                can_view: true,
                can_edit: role.can_edit(),
                role: Some(match role {
                    ProjectRole::Editor => AccessRole::Editor,
                    ProjectRole::Viewer => AccessRole::Viewer,
                }),
            },
            Self::None => ProjectPermissions::none(),
        }
    }
}

/// Resolves effective permissions by fetching the relevant rows.
#[derive(Debug, Clone)]
pub struct AccessResolver {
    /// Membership row lookups.
    members: Arc<MemberRepository>,
    /// Share row lookups.
    shares: Arc<ShareRepository>,
}

impl AccessResolver {
    /// Creates a new access resolver.
    pub fn new(members: Arc<MemberRepository>, shares: Arc<ShareRepository>) -> Self {
        Self { members, shares }
    }

    /// Resolve the account's relation to a project.
    pub async fn resolve(&self, account: &Account, project: &Project) -> AppResult<ProjectRelation> {
        // Same-company wins outright, so the row lookups can be skipped.
        if project.company_id == account.company_id {
            return Ok(ProjectRelation::Company);
        }

        let member = self.members.find(project.id, account.id).await?;
        let share = if member.is_some() {
            None
        } else {
            self.shares.find_open(project.id, &account.email).await?
        };

        Ok(ProjectRelation::resolve(
            account,
            project,
            member.as_ref(),
            share.as_ref(),
        ))
    }

    /// Resolve the effective permission tuple.
    pub async fn permissions(
        &self,
        account: &Account,
        project: &Project,
    ) -> AppResult<ProjectPermissions> {
        Ok(self.resolve(account, project).await?.permissions())
    }

    /// Require view access. Inaccessible projects are indistinguishable from
    /// absent ones: both surface as not-found.
    pub async fn require_view(
        &self,
        account: &Account,
        project: &Project,
    ) -> AppResult<ProjectPermissions> {
        let perms = self.permissions(account, project).await?;
        if !perms.can_view {
            return Err(AppError::not_found("Project not found"));
        }
        Ok(perms)
    }

    /// Require edit access. Viewers get a forbidden response naming the
    /// missing role; accounts without view access get not-found.
    pub async fn require_edit(
        &self,
        account: &Account,
        project: &Project,
    ) -> AppResult<ProjectPermissions> {
        let perms = self.require_view(account, project).await?;
        if !perms.can_edit {
            return Err(AppError::forbidden(
                "Editor role required to modify this project",
            ));
        }
        Ok(perms)
    }

    /// Whether the account may delete the project or alter who can access it.
    ///
    /// Stricter than edit: same company AND (project owner OR company admin).
    pub fn can_manage(account: &Account, project: &Project) -> bool {
        project.company_id == account.company_id
            && (project.owner_id == account.id || account.is_company_admin())
    }

    /// Require manage access for destructive or permission-altering actions.
    pub fn require_manage(account: &Account, project: &Project) -> AppResult<()> {
        if project.company_id != account.company_id {
            // Cross-tenant callers do not learn the project exists.
            return Err(AppError::not_found("Project not found"));
        }
        if !Self::can_manage(account, project) {
            return Err(AppError::forbidden(
                "Only the project owner or a company admin may perform this action",
            ));
        }
        Ok(())
    }
}
