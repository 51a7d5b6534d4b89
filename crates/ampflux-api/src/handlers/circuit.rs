//! Circuit version handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use ampflux_core::error::AppError;

use crate::dto::request::SaveVersionRequest;
use crate::dto::response::VersionResponse;
use crate::extractors::CurrentAccount;
use crate::state::AppState;

/// POST /circuits/{project_id}/save_version — edit-gated.
pub async fn save_version(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(project_id): Path<Uuid>,
    Json(req): Json<SaveVersionRequest>,
) -> Result<Json<VersionResponse>, AppError> {
    let version = state
        .circuit_service
        .save_version(&account, project_id, req.data_json)
        .await?;
    Ok(Json(version.into()))
}

/// GET /circuits/{project_id}/versions — view-gated, newest first.
pub async fn list_versions(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<VersionResponse>>, AppError> {
    let versions = state
        .circuit_service
        .list_versions(&account, project_id)
        .await?;
    Ok(Json(versions.into_iter().map(Into::into).collect()))
}
