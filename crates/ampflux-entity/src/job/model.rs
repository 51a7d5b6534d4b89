//! Job entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::JobStatus;

/// A unit of background work dispatched through the task gateway.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    /// Unique job identifier — doubles as the task id handed to callers.
    pub id: Uuid,
    /// Handler type (e.g. "short_circuit_simulation").
    pub job_type: String,
    /// Job input as JSON.
    pub payload: serde_json::Value,
    /// Current lifecycle state.
    pub status: JobStatus,
    /// Result payload on success.
    pub result: Option<serde_json::Value>,
    /// Failure message on error.
    pub error_message: Option<String>,
    /// Attempts made so far.
    pub attempts: i32,
    /// Maximum attempts before the job is marked failed.
    pub max_attempts: i32,
    /// When a worker last picked the job up.
    pub started_at: Option<DateTime<Utc>>,
    /// When the job reached a terminal state.
    pub completed_at: Option<DateTime<Utc>>,
    /// Account that submitted the job, if any.
    pub created_by: Option<Uuid>,
    /// Identifier of the worker that claimed the job.
    pub worker_id: Option<String>,
    /// When the job was enqueued.
    pub created_at: DateTime<Utc>,
    /// When the job row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to enqueue a new job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJob {
    /// Handler type.
    pub job_type: String,
    /// Job input as JSON.
    pub payload: serde_json::Value,
    /// Maximum attempts.
    pub max_attempts: i32,
    /// Submitting account, if any.
    pub created_by: Option<Uuid>,
}
