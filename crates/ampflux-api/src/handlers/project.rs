//! Project handlers — CRUD, permissions, and membership.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use ampflux_core::error::AppError;
use ampflux_service::project::ProjectService;

use crate::dto::request::{AddMemberRequest, CreateProjectRequest};
use crate::dto::response::{
    MemberResponse, MessageResponse, PermissionsResponse, ProjectResponse,
};
use crate::dto::validate_payload;
use crate::extractors::CurrentAccount;
use crate::state::AppState;

/// POST /projects — create a project; the caller becomes owner and editor.
pub async fn create(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<ProjectResponse>, AppError> {
    validate_payload(&req)?;
    let project = state.project_service.create(&account, &req.name).await?;
    Ok(Json(project.into()))
}

/// GET /projects — the caller's dashboard, most recently updated first.
pub async fn list(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    let projects = state.project_service.list(&account).await?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// GET /projects/{id}
pub async fn get(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ProjectResponse>, AppError> {
    let project = state.project_service.get(&account, project_id).await?;
    Ok(Json(project.into()))
}

/// DELETE /projects/{id} — owner or company admin only.
pub async fn delete(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(project_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.project_service.delete(&account, project_id).await?;
    Ok(Json(MessageResponse::new("Project deleted")))
}

/// GET /projects/{id}/permissions — the caller's effective permission tuple.
pub async fn permissions(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(project_id): Path<Uuid>,
) -> Result<Json<PermissionsResponse>, AppError> {
    let (project, perms) = state
        .project_service
        .permissions(&account, project_id)
        .await?;

    let can_manage = ProjectService::can_manage(&account, &project);
    let is_owner = project.owner_id == account.id;
    Ok(Json(PermissionsResponse::new(perms, can_manage, is_owner)))
}

/// GET /projects/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<MemberResponse>>, AppError> {
    let members = state
        .project_service
        .list_members(&account, project_id)
        .await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// POST /projects/{id}/members — add a same-company collaborator.
pub async fn add_member(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(project_id): Path<Uuid>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .project_service
        .add_member(&account, project_id, req.account_id, req.role)
        .await?;
    Ok(Json(MessageResponse::new("Member added")))
}

/// DELETE /projects/{id}/members/{account_id}
pub async fn remove_member(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path((project_id, member_account_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .project_service
        .remove_member(&account, project_id, member_account_id)
        .await?;
    Ok(Json(MessageResponse::new("Member removed")))
}
