//! Worker runner — poll loop that claims jobs and executes them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, watch};
use tokio::time;
use tracing::{error, info, trace, warn};

use ampflux_core::config::worker::WorkerConfig;

use crate::executor::{JobError, JobExecutor};
use crate::queue::JobQueue;

/// Polls the queue and executes claimed jobs on a bounded task pool.
///
/// The submitting request never blocks on job completion; the runner is the
/// only consumer of the queue.
#[derive(Debug)]
pub struct WorkerRunner {
    /// Job queue for claiming work.
    queue: Arc<JobQueue>,
    /// Handler dispatch.
    executor: Arc<JobExecutor>,
    /// Worker configuration.
    config: WorkerConfig,
    /// Worker identifier.
    worker_id: String,
}

impl WorkerRunner {
    /// Create a new worker runner.
    pub fn new(
        queue: Arc<JobQueue>,
        executor: Arc<JobExecutor>,
        config: WorkerConfig,
        worker_id: String,
    ) -> Self {
        Self {
            queue,
            executor,
            config,
            worker_id,
        }
    }

    /// Run until the cancel signal flips to `true`.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(
            worker_id = %self.worker_id,
            concurrency = self.config.concurrency,
            poll_interval = self.config.poll_interval_seconds,
            "Worker started"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency as usize));
        let poll_interval = Duration::from_secs(self.config.poll_interval_seconds);

        loop {
            if *cancel.borrow() {
                break;
            }

            self.poll_and_execute(&semaphore).await;

            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        info!(worker_id = %self.worker_id, "Worker received shutdown signal");
                        break;
                    }
                }
                _ = time::sleep(poll_interval) => {}
            }
        }

        info!(worker_id = %self.worker_id, "Waiting for in-flight jobs...");
        let max_permits = self.config.concurrency;
        let _ = time::timeout(
            Duration::from_secs(30),
            semaphore.acquire_many(max_permits),
        )
        .await;
        info!(worker_id = %self.worker_id, "Worker shut down");
    }

    /// Claim one job and spawn its execution if a slot is free.
    async fn poll_and_execute(&self, semaphore: &Arc<Semaphore>) {
        let permit = match Arc::clone(semaphore).try_acquire_owned() {
            Ok(p) => p,
            Err(_) => {
                trace!("All worker slots occupied");
                return;
            }
        };

        match self.queue.dequeue().await {
            Ok(Some(job)) => {
                let queue = Arc::clone(&self.queue);
                let executor = Arc::clone(&self.executor);

                tokio::spawn(async move {
                    let _permit = permit;
                    let job_id = job.id;
                    let attempts = job.attempts;
                    let max_attempts = job.max_attempts;

                    match executor.execute(&job).await {
                        Ok(result) => {
                            if let Err(e) = queue.complete(job_id, result).await {
                                error!(%job_id, error = %e, "Failed to mark job completed");
                            }
                        }
                        Err(JobError::Transient(msg)) => {
                            warn!(%job_id, error = %msg, "Job failed (transient)");
                            let outcome = if attempts < max_attempts {
                                queue.retry(job_id).await
                            } else {
                                queue.fail(job_id, &msg).await
                            };
                            if let Err(e) = outcome {
                                error!(%job_id, error = %e, "Failed to record job outcome");
                            }
                        }
                        Err(JobError::Permanent(msg)) => {
                            warn!(%job_id, error = %msg, "Job failed permanently");
                            if let Err(e) = queue.fail(job_id, &msg).await {
                                error!(%job_id, error = %e, "Failed to mark job failed");
                            }
                        }
                        Err(JobError::Internal(err)) => {
                            error!(%job_id, error = %err, "Job internal error");
                            if let Err(e) = queue.fail(job_id, &err.to_string()).await {
                                error!(%job_id, error = %e, "Failed to mark job failed");
                            }
                        }
                    }
                });
            }
            Ok(None) => {
                drop(permit);
                trace!("No jobs available");
            }
            Err(e) => {
                drop(permit);
                error!(error = %e, "Failed to dequeue job");
            }
        }
    }
}
