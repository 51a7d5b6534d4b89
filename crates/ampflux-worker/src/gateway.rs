//! Poll-based task gateway.
//!
//! `submit` commits a pending job row and returns its id; the submitting
//! request never waits for execution. `poll` maps the job row back into the
//! three-state result contract. There is no push path and no cancellation:
//! callers that lose interest simply stop polling.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ampflux_core::result::AppResult;
use ampflux_database::repositories::job::JobRepository;
use ampflux_entity::job::{CreateJob, JobStatus};

/// Result contract returned by [`TaskGateway::poll`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not finished (queued or running).
    Pending,
    /// Finished successfully with a result payload.
    Success {
        /// Handler result.
        result: serde_json::Value,
    },
    /// Finished with an error.
    Error {
        /// Failure message.
        error: String,
    },
}

/// Dispatches work to the job queue and answers poll requests.
#[derive(Debug, Clone)]
pub struct TaskGateway {
    /// Job persistence.
    repo: Arc<JobRepository>,
    /// Attempt budget stamped on submitted jobs.
    max_attempts: i32,
}

impl TaskGateway {
    /// Create a new task gateway.
    pub fn new(repo: Arc<JobRepository>, max_attempts: i32) -> Self {
        Self { repo, max_attempts }
    }

    /// Submit a computation; returns the task id to poll.
    pub async fn submit(
        &self,
        job_type: &str,
        payload: serde_json::Value,
        created_by: Option<Uuid>,
    ) -> AppResult<Uuid> {
        let job = self
            .repo
            .create(&CreateJob {
                job_type: job_type.to_string(),
                payload,
                max_attempts: self.max_attempts,
                created_by,
            })
            .await?;
        Ok(job.id)
    }

    /// Poll a task's status.
    ///
    /// Unknown task ids report as pending, matching the behavior of result
    /// backends that cannot distinguish "never submitted" from "not started".
    pub async fn poll(&self, task_id: Uuid) -> AppResult<TaskStatus> {
        let Some(job) = self.repo.find_by_id(task_id).await? else {
            return Ok(TaskStatus::Pending);
        };

        Ok(match job.status {
            JobStatus::Pending | JobStatus::Running => TaskStatus::Pending,
            JobStatus::Completed => TaskStatus::Success {
                result: job.result.unwrap_or(serde_json::Value::Null),
            },
            JobStatus::Failed => TaskStatus::Error {
                error: job
                    .error_message
                    .unwrap_or_else(|| "Job failed".to_string()),
            },
        })
    }
}
