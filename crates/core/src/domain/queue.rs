// Queue / Dispatch Configuration

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of workers spawned per run
pub const DEFAULT_WORKER_COUNT: usize = 3;

/// Default bounded queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 5;

/// Default simulated processing latency per message (100ms)
pub const DEFAULT_PROCESSING_LATENCY_MS: u64 = 100;

/// Explicit configuration for one dispatcher run
///
/// Passed to the components that need it; there is no process-wide instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub worker_count: usize,
    pub queue_capacity: usize,
    pub processing_latency_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            processing_latency_ms: DEFAULT_PROCESSING_LATENCY_MS,
        }
    }
}

impl DispatchConfig {
    pub fn new(worker_count: usize, queue_capacity: usize) -> Self {
        Self {
            worker_count,
            queue_capacity,
            ..Default::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.processing_latency_ms = latency.as_millis() as u64;
        self
    }

    pub fn processing_latency(&self) -> Duration {
        Duration::from_millis(self.processing_latency_ms)
    }

    /// Zero workers is allowed (nothing drains the queue); zero capacity is not.
    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(DomainError::ValidationError(
                "queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
