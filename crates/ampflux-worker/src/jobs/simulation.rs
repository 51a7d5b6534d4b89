//! Short-circuit fault simulation job.
//!
//! The computation itself is a trivial series-circuit Ohm's law sum; it
//! exists as the worked example of the async task contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use ampflux_entity::job::Job;

use crate::executor::{JobError, JobHandler};

/// Job type dispatched by the simulate endpoint.
pub const SHORT_CIRCUIT_JOB: &str = "short_circuit_simulation";

/// Input payload for a short-circuit simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Source voltage in volts.
    pub voltage: f64,
    /// Series resistances in ohms.
    pub resistances: Vec<f64>,
}

/// Computed simulation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Fault current in amperes.
    pub fault_current: f64,
    /// Sum of the series resistances in ohms.
    pub total_resistance: f64,
}

/// Compute the fault current for a series circuit.
///
/// A zero total resistance is a domain error, not a divide-by-zero escape.
pub fn compute_fault_current(
    voltage: f64,
    resistances: &[f64],
) -> Result<SimulationOutcome, String> {
    let total_resistance: f64 = resistances.iter().sum();
    if total_resistance == 0.0 {
        return Err("Total resistance cannot be zero.".to_string());
    }
    Ok(SimulationOutcome {
        fault_current: voltage / total_resistance,
        total_resistance,
    })
}

/// Executes short-circuit simulations submitted through the task gateway.
#[derive(Debug, Default)]
pub struct ShortCircuitJobHandler;

impl ShortCircuitJobHandler {
    /// Create a new handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl JobHandler for ShortCircuitJobHandler {
    fn job_type(&self) -> &str {
        SHORT_CIRCUIT_JOB
    }

    async fn execute(&self, job: &Job) -> Result<Option<Value>, JobError> {
        let input: SimulationInput = serde_json::from_value(job.payload.clone())
            .map_err(|e| JobError::Permanent(format!("Malformed simulation payload: {e}")))?;

        let outcome = compute_fault_current(input.voltage, &input.resistances)
            .map_err(JobError::Permanent)?;

        Ok(Some(json!({
            "status": "ok",
            "fault_current": outcome.fault_current,
            "total_resistance": outcome.total_resistance,
        })))
    }
}
