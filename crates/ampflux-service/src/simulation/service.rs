//! Simulation service — dispatches short-circuit runs to the task gateway.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use ampflux_auth::access::AccessResolver;
use ampflux_core::error::AppError;
use ampflux_core::result::AppResult;
use ampflux_database::repositories::project::ProjectRepository;
use ampflux_database::repositories::simulation::SimulationRepository;
use ampflux_entity::account::Account;
use ampflux_entity::project::Project;
use ampflux_entity::simulation::Simulation;
use ampflux_worker::gateway::{TaskGateway, TaskStatus};
use ampflux_worker::jobs::simulation::SHORT_CIRCUIT_JOB;

use crate::audit::AuditRecorder;

/// Submits simulations and answers result polls.
///
/// The persisted simulation row is a pending placeholder; live status comes
/// from the task backend via [`SimulationService::poll`]. The row is not
/// reconciled on completion.
#[derive(Debug, Clone)]
pub struct SimulationService {
    /// Project lookups.
    projects: Arc<ProjectRepository>,
    /// Simulation record persistence.
    simulations: Arc<SimulationRepository>,
    /// Task dispatch and polling.
    gateway: Arc<TaskGateway>,
    /// Permission resolution.
    resolver: Arc<AccessResolver>,
    /// Audit trail.
    audit: AuditRecorder,
}

impl SimulationService {
    /// Creates a new simulation service.
    pub fn new(
        projects: Arc<ProjectRepository>,
        simulations: Arc<SimulationRepository>,
        gateway: Arc<TaskGateway>,
        resolver: Arc<AccessResolver>,
        audit: AuditRecorder,
    ) -> Self {
        Self {
            projects,
            simulations,
            gateway,
            resolver,
            audit,
        }
    }

    /// Submit a short-circuit simulation for a project. Edit-gated.
    ///
    /// `circuit_data` is the raw circuit JSON string; malformed JSON or a
    /// non-numeric voltage is a validation error raised before anything is
    /// dispatched or written.
    pub async fn submit(
        &self,
        account: &Account,
        project_id: Uuid,
        circuit_data: &str,
    ) -> AppResult<Simulation> {
        let project = self.load(project_id).await?;
        self.resolver.require_edit(account, &project).await?;

        let (voltage, resistances) = parse_circuit_input(circuit_data)?;

        let task_id = self
            .gateway
            .submit(
                SHORT_CIRCUIT_JOB,
                json!({"voltage": voltage, "resistances": resistances}),
                Some(account.id),
            )
            .await?;

        let simulation = self
            .simulations
            .create(
                project_id,
                task_id,
                &json!({"task_id": task_id, "status": "pending"}),
                account.id,
            )
            .await?;

        self.projects.touch(project_id).await?;

        self.audit
            .record(
                project_id,
                account.id,
                "simulation.submit",
                Some(json!({"task_id": task_id})),
            )
            .await;

        info!(%project_id, %task_id, account_id = %account.id, "Simulation submitted");
        Ok(simulation)
    }

    /// Poll a dispatched task's status.
    pub async fn poll(&self, task_id: Uuid) -> AppResult<TaskStatus> {
        self.gateway.poll(task_id).await
    }

    /// List a project's simulation records, newest first. View-gated.
    pub async fn list(&self, account: &Account, project_id: Uuid) -> AppResult<Vec<Simulation>> {
        let project = self.load(project_id).await?;
        self.resolver.require_view(account, &project).await?;
        self.simulations.list_by_project(project_id).await
    }

    async fn load(&self, project_id: Uuid) -> AppResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))
    }
}

/// Parse the circuit payload into `(voltage, resistances)`.
///
/// Numbers may arrive as JSON numbers or numeric strings; anything else is a
/// validation error.
fn parse_circuit_input(circuit_data: &str) -> AppResult<(f64, Vec<f64>)> {
    let parsed: Value = serde_json::from_str(circuit_data)
        .map_err(|_| AppError::validation("Malformed circuit JSON"))?;

    let voltage = numeric_value(parsed.get("voltage").unwrap_or(&Value::Null))
        .ok_or_else(|| AppError::validation("Voltage must be numeric"))?;

    let resistances = match parsed.get("resistances") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                numeric_value(item)
                    .ok_or_else(|| AppError::validation("Resistances must be numeric"))
            })
            .collect::<AppResult<Vec<f64>>>()?,
        Some(_) => return Err(AppError::validation("Resistances must be an array")),
    };

    Ok((voltage, resistances))
}

/// Accept a JSON number or a numeric string.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
