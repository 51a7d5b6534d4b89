//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::AccountRole;

/// A registered account in the AmpFlux system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique login email.
    pub email: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account role within the company. Fixed at creation.
    pub role: AccountRole,
    /// Owning company (tenant boundary).
    pub company_id: Uuid,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Check whether this account administers its company.
    pub fn is_company_admin(&self) -> bool {
        self.role == AccountRole::CompanyAdmin
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    /// Display name.
    pub name: String,
    /// Login email (must be unique).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: AccountRole,
    /// Owning company.
    pub company_id: Uuid,
}
