//! Outbound response payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ampflux_auth::access::{AccessRole, ProjectPermissions};
use ampflux_entity::account::{Account, AccountRole};
use ampflux_entity::circuit::CircuitVersion;
use ampflux_entity::company::Company;
use ampflux_entity::project::{Project, ProjectRole};
use ampflux_entity::share::{ProjectShare, ShareStatus};
use ampflux_entity::simulation::Simulation;
use ampflux_service::project::MemberDetails;
use ampflux_service::share::SharedProject;

/// Simple acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Build from anything stringy.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Company summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    /// Company ID.
    pub id: Uuid,
    /// Company name.
    pub name: String,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
        }
    }
}

/// Account summary (never includes the password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Company role.
    pub role: AccountRole,
    /// Owning company ID.
    pub company_id: Uuid,
    /// Company summary, when loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyResponse>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
            company_id: account.company_id,
            company: None,
        }
    }
}

/// Login/registration result. The tokens travel in cookies, not the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated account.
    pub account: AccountResponse,
    /// Access token expiry.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiry.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Refresh result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New access token expiry.
    pub access_expires_at: DateTime<Utc>,
}

/// Project summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
    /// Project ID.
    pub id: Uuid,
    /// Project name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last content mutation time.
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

/// The caller's effective permissions on a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionsResponse {
    /// May read.
    pub can_view: bool,
    /// May mutate content.
    pub can_edit: bool,
    /// May create shares / manage members.
    pub can_share: bool,
    /// May delete the project.
    pub can_delete: bool,
    /// Granted role, if any.
    pub role: Option<AccessRole>,
    /// Whether the caller owns the project.
    pub is_owner: bool,
}

impl PermissionsResponse {
    /// Combine the resolver tuple with the manage/ownership facts.
    pub fn new(perms: ProjectPermissions, can_manage: bool, is_owner: bool) -> Self {
        Self {
            can_view: perms.can_view,
            can_edit: perms.can_edit,
            can_share: can_manage,
            can_delete: can_manage,
            role: perms.role,
            is_owner,
        }
    }
}

/// Project member with account details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    /// Membership row ID.
    pub id: Uuid,
    /// Member account ID.
    pub account_id: Uuid,
    /// Member display name.
    pub name: String,
    /// Member email.
    pub email: String,
    /// Granted role.
    pub role: ProjectRole,
    /// Whether this member owns the project.
    pub is_owner: bool,
}

impl From<MemberDetails> for MemberResponse {
    fn from(details: MemberDetails) -> Self {
        Self {
            id: details.member.id,
            account_id: details.member.account_id,
            name: details.name,
            email: details.email,
            role: details.member.role,
            is_owner: details.is_owner,
        }
    }
}

/// Share invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    /// Share ID.
    pub id: Uuid,
    /// Shared project ID.
    pub project_id: Uuid,
    /// Inviting account ID.
    pub invited_by: Uuid,
    /// Invitee email.
    pub invitee_email: String,
    /// Requested role.
    pub role: ProjectRole,
    /// Invitation state.
    pub status: ShareStatus,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
    /// When it was accepted, if it was.
    pub accepted_at: Option<DateTime<Utc>>,
}

impl From<ProjectShare> for ShareResponse {
    fn from(share: ProjectShare) -> Self {
        Self {
            id: share.id,
            project_id: share.project_id,
            invited_by: share.invited_by,
            invitee_email: share.invitee_email,
            role: share.role,
            status: share.status,
            created_at: share.created_at,
            accepted_at: share.accepted_at,
        }
    }
}

/// A share joined with project and inviter summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedProjectResponse {
    /// The invitation.
    #[serde(flatten)]
    pub share: ShareResponse,
    /// The shared project.
    pub project: ProjectResponse,
    /// Inviter display name.
    pub shared_by_name: String,
    /// Inviter email.
    pub shared_by_email: String,
}

impl From<SharedProject> for SharedProjectResponse {
    fn from(shared: SharedProject) -> Self {
        Self {
            share: shared.share.into(),
            project: shared.project.into(),
            shared_by_name: shared.shared_by_name,
            shared_by_email: shared.shared_by_email,
        }
    }
}

/// Saved circuit version (content included).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    /// Version ID.
    pub id: Uuid,
    /// Per-project gapless version number.
    pub version_number: i32,
    /// Circuit snapshot.
    pub data_json: serde_json::Value,
    /// When the version was saved.
    pub created_at: DateTime<Utc>,
}

impl From<CircuitVersion> for VersionResponse {
    fn from(version: CircuitVersion) -> Self {
        Self {
            id: version.id,
            version_number: version.version_number,
            data_json: version.data_json,
            created_at: version.created_at,
        }
    }
}

/// Simulation submission acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSubmitResponse {
    /// Simulation record ID.
    pub id: Uuid,
    /// Task id to poll.
    pub task_id: Uuid,
    /// Always "pending" at submission time.
    pub status: String,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// Persisted simulation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResponse {
    /// Simulation record ID.
    pub id: Uuid,
    /// Dispatched task ID.
    pub task_id: Uuid,
    /// Placeholder payload as recorded at submission time.
    pub result: serde_json::Value,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl From<Simulation> for SimulationResponse {
    fn from(simulation: Simulation) -> Self {
        Self {
            id: simulation.id,
            task_id: simulation.task_id,
            result: simulation.result_json,
            created_at: simulation.created_at,
        }
    }
}
