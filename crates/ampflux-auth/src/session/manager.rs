//! Session lifecycle manager — register, login, refresh, and logout flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use ampflux_core::config::auth::AuthConfig;
use ampflux_core::error::AppError;
use ampflux_core::result::AppResult;
use ampflux_database::repositories::account::AccountRepository;
use ampflux_database::repositories::company::CompanyRepository;
use ampflux_entity::account::{Account, AccountRole};

use crate::jwt::{TokenIssuer, TokenKind, TokenPair, TokenVerifier};
use crate::password::PasswordHasher;

/// The single opaque message returned for every authentication failure.
///
/// Which check failed (missing cookie, bad signature, expiry, revocation,
/// wrong kind, unknown account) must not be distinguishable by the caller.
pub const AUTH_FAILED: &str = "Authentication required";

/// Parameters for registering a new account.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Company name; defaults to a personal company when absent.
    pub company_name: Option<String>,
}

/// Manages the complete credential and token lifecycle.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Token creation.
    issuer: Arc<TokenIssuer>,
    /// Token validation and revocation.
    verifier: Arc<TokenVerifier>,
    /// Password hashing.
    hasher: Arc<PasswordHasher>,
    /// Account persistence.
    accounts: Arc<AccountRepository>,
    /// Company lookups for collision handling.
    companies: Arc<CompanyRepository>,
    /// Auth configuration.
    config: AuthConfig,
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        issuer: Arc<TokenIssuer>,
        verifier: Arc<TokenVerifier>,
        hasher: Arc<PasswordHasher>,
        accounts: Arc<AccountRepository>,
        companies: Arc<CompanyRepository>,
        config: AuthConfig,
    ) -> Self {
        Self {
            issuer,
            verifier,
            hasher,
            accounts,
            companies,
            config,
        }
    }

    /// Registers a new account, creating its company implicitly.
    ///
    /// Duplicate emails are rejected before any write, so a failed
    /// registration leaves neither an account nor a company behind. Company
    /// name collisions are resolved by suffixing a random token. The first
    /// account of a company is its admin.
    pub async fn register(&self, params: RegisterParams) -> AppResult<(Account, TokenPair)> {
        if params.password.len() < self.config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.config.password_min_length
            )));
        }

        if self.accounts.find_by_email(&params.email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let base_name = params
            .company_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("{}'s Company", params.name));
        let company_name = self.dedupe_company_name(base_name).await?;

        let password_hash = self.hasher.hash(&params.password)?;

        let (account, company) = self
            .accounts
            .register(
                &company_name,
                &params.name,
                &params.email,
                &password_hash,
                AccountRole::CompanyAdmin,
            )
            .await?;

        info!(
            account_id = %account.id,
            company_id = %company.id,
            company = %company.name,
            "Account registered"
        );

        let tokens = self.issuer.issue_pair(account.id)?;
        Ok((account, tokens))
    }

    /// Authenticates credentials and issues an access + refresh pair.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(Account, TokenPair)> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !self.hasher.verify(password, &account.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let tokens = self.issuer.issue_pair(account.id)?;
        info!(account_id = %account.id, "Login successful");
        Ok((account, tokens))
    }

    /// Exchanges a refresh token for a fresh access token.
    ///
    /// The refresh token itself is not rotated. The subject must still
    /// resolve to a live account.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(String, DateTime<Utc>)> {
        let claims = self
            .verifier
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                debug!(reason = %e, "Refresh token rejected");
                AppError::unauthorized(AUTH_FAILED)
            })?;

        let account = self.load_account(claims.sub).await?;
        self.issuer.issue(account.id, TokenKind::Access)
    }

    /// Revokes whichever tokens the caller presented.
    ///
    /// Idempotent: absent cookies and already-revoked or garbage tokens are
    /// all fine.
    pub fn logout(&self, access_token: Option<&str>, refresh_token: Option<&str>) {
        if let Some(token) = access_token {
            self.verifier.revoke(token);
        }
        if let Some(token) = refresh_token {
            self.verifier.revoke(token);
        }
    }

    /// Resolves a request's access token to an account, or fails closed.
    ///
    /// Every failure collapses to the same opaque unauthorized error; the
    /// concrete reason is only logged.
    pub async fn authenticate(&self, access_token: &str) -> AppResult<Account> {
        let claims = self
            .verifier
            .verify(access_token, TokenKind::Access)
            .map_err(|e| {
                debug!(reason = %e, "Access token rejected");
                AppError::unauthorized(AUTH_FAILED)
            })?;

        self.load_account(claims.sub).await
    }

    /// Looks up a token subject, collapsing a missing account to the opaque
    /// unauthorized error.
    async fn load_account(&self, account_id: Uuid) -> AppResult<Account> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| {
                debug!(%account_id, "Token subject no longer exists");
                AppError::unauthorized(AUTH_FAILED)
            })
    }

    /// Resolves a unique company name, suffixing a random token on collision.
    async fn dedupe_company_name(&self, base: String) -> AppResult<String> {
        if self.companies.find_by_name(&base).await?.is_none() {
            return Ok(base);
        }
        let token = Uuid::new_v4().simple().to_string();
        Ok(format!("{base} ({})", &token[..8]))
    }
}
