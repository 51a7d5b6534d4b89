//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Simulation worker pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the in-process worker is started.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Maximum number of jobs executing concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,
    /// Queue poll interval in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Default maximum attempts for a job before it is marked failed.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            concurrency: default_concurrency(),
            poll_interval_seconds: default_poll_interval(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_concurrency() -> u32 {
    4
}

fn default_poll_interval() -> u64 {
    1
}

fn default_max_attempts() -> i32 {
    3
}
