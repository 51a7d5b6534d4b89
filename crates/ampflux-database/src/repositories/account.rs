//! Account repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ampflux_core::error::{AppError, ErrorKind};
use ampflux_core::result::AppResult;
use ampflux_entity::account::{Account, CreateAccount};
use ampflux_entity::account::role::AccountRole;
use ampflux_entity::company::Company;

use super::map_insert_err;

/// Repository for account lookup and registration.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find account", e))
    }

    /// Find an account by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
            })
    }

    /// List all accounts of a company.
    pub async fn list_by_company(&self, company_id: Uuid) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE company_id = $1 ORDER BY created_at ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))
    }

    /// Create an account under an existing company.
    pub async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (name, email, password_hash, role, company_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(data.company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "Email already registered"))
    }

    /// Create a company and its first account in a single transaction.
    ///
    /// If the account insert fails (duplicate email), the company insert is
    /// rolled back so no orphan tenant is left behind.
    pub async fn register(
        &self,
        company_name: &str,
        name: &str,
        email: &str,
        password_hash: &str,
        role: AccountRole,
    ) -> AppResult<(Account, Company)> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin tx", e))?;

        let company = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (name) VALUES ($1) RETURNING *",
        )
        .bind(company_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_insert_err(e, "Company name already taken"))?;

        let account = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (name, email, password_hash, role, company_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(company.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_insert_err(e, "Email already registered"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit tx", e))?;

        Ok((account, company))
    }
}
