//! Sharing lifecycle handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use ampflux_core::error::AppError;

use crate::dto::request::ShareProjectRequest;
use crate::dto::response::{ShareResponse, SharedProjectResponse};
use crate::dto::validate_payload;
use crate::extractors::CurrentAccount;
use crate::state::AppState;

/// POST /projects/{id}/share — invite an email address. Manage-gated.
pub async fn create(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(project_id): Path<Uuid>,
    Json(req): Json<ShareProjectRequest>,
) -> Result<Json<ShareResponse>, AppError> {
    validate_payload(&req)?;
    let share = state
        .share_service
        .create(&account, project_id, &req.email, req.role)
        .await?;
    Ok(Json(share.into()))
}

/// GET /projects/shared/with-me — pending and accepted invitations.
pub async fn shared_with_me(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<Vec<SharedProjectResponse>>, AppError> {
    let shared = state.share_service.list_shared_with_me(&account).await?;
    Ok(Json(shared.into_iter().map(Into::into).collect()))
}

/// POST /projects/{id}/accept-share — accept the caller's pending invite.
pub async fn accept(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ShareResponse>, AppError> {
    let share = state.share_service.accept(&account, project_id).await?;
    Ok(Json(share.into()))
}

/// POST /projects/{id}/decline-share — decline the caller's pending invite.
pub async fn decline(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ShareResponse>, AppError> {
    let share = state.share_service.decline(&account, project_id).await?;
    Ok(Json(share.into()))
}
