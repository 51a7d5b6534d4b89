//! Inbound request payloads.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use ampflux_entity::project::ProjectRole;

/// POST /auth/register
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Optional company name; a personal company is created when absent.
    pub company_name: Option<String>,
}

/// POST /auth/login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// POST /projects
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name.
    #[validate(length(min = 3, message = "Project name must be at least 3 characters"))]
    pub name: String,
}

/// POST /projects/{id}/members
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    /// Account to add (must be in the caller's company).
    pub account_id: Uuid,
    /// Granted role.
    pub role: ProjectRole,
}

/// POST /projects/{id}/share
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShareProjectRequest {
    /// Invitee email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Requested role.
    pub role: ProjectRole,
}

/// POST /circuits/{project_id}/save_version
#[derive(Debug, Clone, Deserialize)]
pub struct SaveVersionRequest {
    /// Circuit snapshot.
    pub data_json: serde_json::Value,
}

/// POST /circuits/{project_id}/simulate
#[derive(Debug, Clone, Deserialize)]
pub struct SimulateRequest {
    /// Raw circuit JSON string carrying `voltage` and `resistances`.
    pub circuit_data: String,
}

/// POST /users/invite
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteRequest {
    /// Invitee email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}
