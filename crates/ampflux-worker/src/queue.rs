//! Job queue for enqueuing and claiming background jobs.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use ampflux_core::result::AppResult;
use ampflux_database::repositories::job::JobRepository;
use ampflux_entity::job::{CreateJob, Job, JobStatus};

/// Queue facade over the job table.
///
/// Claiming uses `FOR UPDATE SKIP LOCKED`, so multiple workers can poll the
/// same table without handing the same job out twice.
#[derive(Debug, Clone)]
pub struct JobQueue {
    /// Job persistence.
    repo: Arc<JobRepository>,
    /// Identifier recorded on claimed jobs.
    worker_id: String,
}

impl JobQueue {
    /// Create a new job queue.
    pub fn new(repo: Arc<JobRepository>, worker_id: String) -> Self {
        Self { repo, worker_id }
    }

    /// Enqueue a new job.
    pub async fn enqueue(&self, params: CreateJob) -> AppResult<Job> {
        let job = self.repo.create(&params).await?;
        debug!(job_id = %job.id, job_type = %job.job_type, "Enqueued job");
        Ok(job)
    }

    /// Claim the next available job, if any.
    pub async fn dequeue(&self) -> AppResult<Option<Job>> {
        let job = self.repo.claim_next(&self.worker_id).await?;
        if let Some(ref job) = job {
            debug!(job_id = %job.id, job_type = %job.job_type, "Claimed job");
        }
        Ok(job)
    }

    /// Mark a job as completed successfully.
    pub async fn complete(&self, job_id: Uuid, result: Option<serde_json::Value>) -> AppResult<()> {
        self.repo.complete(job_id, result.as_ref()).await?;
        debug!(%job_id, "Job completed");
        Ok(())
    }

    /// Mark a job as failed.
    pub async fn fail(&self, job_id: Uuid, error: &str) -> AppResult<()> {
        self.repo.fail(job_id, error).await?;
        debug!(%job_id, error, "Job failed");
        Ok(())
    }

    /// Return a job to the queue for another attempt.
    pub async fn retry(&self, job_id: Uuid) -> AppResult<()> {
        self.repo.retry(job_id).await?;
        debug!(%job_id, "Job requeued for retry");
        Ok(())
    }

    /// Queue statistics.
    pub async fn stats(&self) -> AppResult<QueueStats> {
        Ok(QueueStats {
            pending: self.repo.count_by_status(JobStatus::Pending).await?,
            running: self.repo.count_by_status(JobStatus::Running).await?,
            failed: self.repo.count_by_status(JobStatus::Failed).await?,
            worker_id: self.worker_id.clone(),
        })
    }
}

/// Queue statistics.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct QueueStats {
    /// Number of pending jobs.
    pub pending: i64,
    /// Number of running jobs.
    pub running: i64,
    /// Number of failed jobs.
    pub failed: i64,
    /// Current worker identifier.
    pub worker_id: String,
}
