// Worker - Message consumption loop

mod completion;
pub mod constants;
mod panic_guard;

pub use completion::{completion_channel, CompletionGuard, CompletionWaiter};
pub use panic_guard::{
    execute_guarded, execute_guarded_async, execute_guarded_quiet, PanicGuardResult,
};

use crate::domain::{Message, WorkerId, WorkerLifecycle};
use crate::error::Result;
use crate::port::MessageHandler;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

/// Consumer end of the bounded queue, shared by every worker
///
/// The lock is held only while waiting for the next message, never while
/// the message is being processed.
pub type SharedReceiver = Arc<Mutex<mpsc::Receiver<Message>>>;

/// Worker consumes messages from the shared queue until it is closed and drained
pub struct Worker {
    id: WorkerId,
    queue: SharedReceiver,
    handler: Arc<dyn MessageHandler>,
    // Run-wide count of finished messages
    processed: Arc<AtomicUsize>,
}

impl Worker {
    pub fn new(
        id: WorkerId,
        queue: SharedReceiver,
        handler: Arc<dyn MessageHandler>,
        processed: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            id,
            queue,
            handler,
            processed,
        }
    }

    /// Run the worker loop to completion.
    ///
    /// `completion` is dropped when this future finishes (or unwinds), which
    /// signals the dispatcher exactly once.
    pub async fn run(self, completion: CompletionGuard) -> Result<WorkerLifecycle> {
        let _completion = completion;
        let mut lifecycle = WorkerLifecycle::new(self.id);
        debug!(worker_id = self.id, "Worker started");

        while let Some(message) = self.next_message().await {
            lifecycle.begin()?;
            self.handler.handle(self.id, &message).await;
            lifecycle.finish()?;
            self.processed.fetch_add(1, Ordering::SeqCst);
        }

        lifecycle.retire()?;
        info!(
            worker_id = self.id,
            processed = lifecycle.processed,
            "Worker finished"
        );
        Ok(lifecycle)
    }

    /// Dequeue the next message; `None` once the queue is closed and empty
    async fn next_message(&self) -> Option<Message> {
        let mut rx = self.queue.lock().await;
        rx.recv().await
    }
}
