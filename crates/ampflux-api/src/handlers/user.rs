//! User and company handlers.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use ampflux_core::error::AppError;

use crate::dto::request::InviteRequest;
use crate::dto::response::{AccountResponse, CompanyResponse, MessageResponse};
use crate::dto::validate_payload;
use crate::extractors::CurrentAccount;
use crate::state::AppState;

/// GET /users/me — the caller's profile with company details.
pub async fn me(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<AccountResponse>, AppError> {
    let company = state.companies.find_by_id(account.company_id).await?;

    let mut response = AccountResponse::from(account);
    response.company = company.map(CompanyResponse::from);
    Ok(Json(response))
}

/// GET /users — the caller's company roster.
pub async fn list(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let accounts = state.accounts.list_by_company(account.company_id).await?;
    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// GET /users/company — the caller's company.
pub async fn company(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<CompanyResponse>, AppError> {
    let company = state
        .companies
        .find_by_id(account.company_id)
        .await?
        .ok_or_else(|| AppError::not_found("Company not found"))?;
    Ok(Json(company.into()))
}

/// POST /users/invite — send a company invite email. Admin-only.
///
/// Delivery is a side channel: a failed send degrades to a warning log.
pub async fn invite(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(req): Json<InviteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_payload(&req)?;

    if !account.is_company_admin() {
        return Err(AppError::forbidden("Company admin role required"));
    }

    if state.accounts.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::conflict("Account already exists"));
    }

    let company = state
        .companies
        .find_by_id(account.company_id)
        .await?
        .ok_or_else(|| AppError::not_found("Company not found"))?;

    if let Err(e) = state
        .notifier
        .send_company_invite(&req.email, &company.name)
        .await
    {
        warn!(to = %req.email, error = %e, "Invite email failed");
    }

    Ok(Json(MessageResponse::new(format!(
        "Invite sent to {}",
        req.email
    ))))
}
