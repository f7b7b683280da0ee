// Message Handler Port
// Abstraction for the per-message work a worker performs

use crate::domain::{Message, WorkerId};
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Handler invoked by a worker for every dequeued message
///
/// Implementations:
/// - SimulatedHandler: fixed-latency simulated work (production default)
/// - mocks::RecordingHandler: records deliveries for tests
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Process one message on behalf of `worker`.
    ///
    /// Infallible: no failure path is modeled for processing.
    async fn handle(&self, worker: WorkerId, message: &Message);
}

/// Logs the message verbatim and sleeps for a fixed latency
#[derive(Debug, Clone)]
pub struct SimulatedHandler {
    latency: Duration,
}

impl SimulatedHandler {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl MessageHandler for SimulatedHandler {
    async fn handle(&self, worker: WorkerId, message: &Message) {
        info!(worker_id = worker, msg = %message, "[Worker {}] Received message: {}", worker, message);
        tokio::time::sleep(self.latency).await;
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every (worker, message) delivery, optionally after a delay
    #[derive(Clone, Default)]
    pub struct RecordingHandler {
        deliveries: Arc<Mutex<Vec<(WorkerId, Message)>>>,
        delay: Duration,
    }

    impl RecordingHandler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_delay(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::default()
            }
        }

        pub fn deliveries(&self) -> Vec<(WorkerId, Message)> {
            self.deliveries.lock().unwrap().clone()
        }

        /// Delivered messages sorted by content (multiset view)
        pub fn sorted_messages(&self) -> Vec<Message> {
            let mut messages: Vec<Message> =
                self.deliveries().into_iter().map(|(_, m)| m).collect();
            messages.sort();
            messages
        }

        pub fn call_count(&self) -> usize {
            self.deliveries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl MessageHandler for RecordingHandler {
        async fn handle(&self, worker: WorkerId, message: &Message) {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.deliveries
                .lock()
                .unwrap()
                .push((worker, message.clone()));
        }
    }
}
