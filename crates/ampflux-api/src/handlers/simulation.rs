//! Simulation handlers — submit, poll, list.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};
use uuid::Uuid;

use ampflux_core::error::{AppError, ErrorKind};
use ampflux_worker::gateway::TaskStatus;

use crate::dto::request::SimulateRequest;
use crate::dto::response::SimulationResponse;
use crate::extractors::CurrentAccount;
use crate::state::AppState;

/// POST /circuits/{project_id}/simulate — edit-gated.
///
/// Malformed circuit payloads come back as a structured
/// `{"status": "error", "error": ...}` body instead of a failed request, so
/// the client can render the problem inline.
pub async fn simulate(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(project_id): Path<Uuid>,
    Json(req): Json<SimulateRequest>,
) -> Result<Json<Value>, AppError> {
    match state
        .simulation_service
        .submit(&account, project_id, &req.circuit_data)
        .await
    {
        Ok(simulation) => Ok(Json(json!({
            "id": simulation.id,
            "task_id": simulation.task_id,
            "status": "pending",
            "created_at": simulation.created_at,
        }))),
        Err(err) if err.kind == ErrorKind::Validation => Ok(Json(json!({
            "status": "error",
            "error": err.message,
        }))),
        Err(err) => Err(err),
    }
}

/// GET /circuits/simulation_result/{task_id} — the poll contract.
pub async fn simulation_result(
    State(state): State<AppState>,
    CurrentAccount(_account): CurrentAccount,
    Path(task_id): Path<Uuid>,
) -> Result<Json<TaskStatus>, AppError> {
    let status = state.simulation_service.poll(task_id).await?;
    Ok(Json(status))
}

/// GET /circuits/{project_id}/simulations — view-gated, newest first.
pub async fn list(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<SimulationResponse>>, AppError> {
    let simulations = state.simulation_service.list(&account, project_id).await?;
    Ok(Json(simulations.into_iter().map(Into::into).collect()))
}
