// Dispatcher - bounded fan-out of messages to a fixed worker pool

use crate::application::worker::{completion_channel, CompletionWaiter, SharedReceiver, Worker};
use crate::domain::{DispatchConfig, Message, WorkerLifecycle};
use crate::error::{AppError, Result};
use crate::port::MessageHandler;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub workers: usize,
    pub submitted: usize,
    pub processed: usize,
    /// Outstanding-worker count observed when `close_and_wait` returned
    pub remaining_workers: usize,
}

/// Producer side of a run: owns the queue sender and the worker handles
///
/// Must be started from within a tokio runtime.
pub struct Dispatcher {
    config: DispatchConfig,
    sender: mpsc::Sender<Message>,
    // Keeps the queue open even when no worker holds it
    _queue: SharedReceiver,
    completion: CompletionWaiter,
    handles: Vec<JoinHandle<Result<WorkerLifecycle>>>,
    processed: Arc<AtomicUsize>,
    submitted: usize,
}

impl Dispatcher {
    /// Create the queue and spawn `config.worker_count` workers.
    ///
    /// Returns immediately; workers suspend until messages arrive.
    pub fn start(config: DispatchConfig, handler: Arc<dyn MessageHandler>) -> Result<Self> {
        config.validate()?;

        let (sender, receiver) = mpsc::channel(config.queue_capacity);
        let queue: SharedReceiver = Arc::new(Mutex::new(receiver));
        let (completion, guards) = completion_channel(config.worker_count);
        let processed = Arc::new(AtomicUsize::new(0));

        let handles = guards
            .into_iter()
            .enumerate()
            .map(|(index, guard)| {
                let worker = Worker::new(
                    index + 1,
                    Arc::clone(&queue),
                    Arc::clone(&handler),
                    Arc::clone(&processed),
                );
                tokio::spawn(worker.run(guard))
            })
            .collect();

        info!(
            workers = config.worker_count,
            capacity = config.queue_capacity,
            "Dispatcher started"
        );

        Ok(Self {
            config,
            sender,
            _queue: queue,
            completion,
            handles,
            processed,
            submitted: 0,
        })
    }

    /// Workers that have not yet exited
    pub fn remaining_workers(&self) -> usize {
        self.completion.remaining()
    }

    /// Enqueue one message, waiting for a free slot while the queue is full
    pub async fn submit(&mut self, message: impl Into<Message>) -> Result<()> {
        self.sender
            .send(message.into())
            .await
            .map_err(|_| AppError::QueueClosed)?;
        self.submitted += 1;
        Ok(())
    }

    /// Enqueue one message without waiting
    ///
    /// # Errors
    /// - AppError::QueueFull if every slot is taken
    pub fn try_submit(&mut self, message: impl Into<Message>) -> Result<()> {
        match self.sender.try_send(message.into()) {
            Ok(()) => {
                self.submitted += 1;
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                Err(AppError::QueueFull(self.config.queue_capacity))
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(AppError::QueueClosed),
        }
    }

    /// Submit every message in order
    pub async fn submit_all<I, M>(&mut self, messages: I) -> Result<()>
    where
        I: IntoIterator<Item = M>,
        M: Into<Message>,
    {
        for message in messages {
            self.submit(message).await?;
        }
        Ok(())
    }

    /// Close the queue and wait until every worker has drained it and exited
    pub async fn close_and_wait(self) -> Result<RunSummary> {
        let Self {
            config,
            sender,
            _queue,
            mut completion,
            handles,
            processed,
            submitted,
        } = self;

        drop(sender);
        info!(submitted, "Queue closed, waiting for workers");
        completion.wait().await;

        // Every worker has signaled; joining only surfaces abnormal exits
        for handle in handles {
            match handle.await {
                Ok(Ok(lifecycle)) => {
                    debug!(worker_id = lifecycle.id, processed = lifecycle.processed, "Worker joined")
                }
                Ok(Err(e)) => error!(error = %e, "Worker ended with an invalid lifecycle"),
                Err(join_err) => error!(error = ?join_err, "Worker task aborted"),
            }
        }

        let summary = RunSummary {
            workers: config.worker_count,
            submitted,
            processed: processed.load(Ordering::SeqCst),
            remaining_workers: completion.remaining(),
        };
        info!(
            processed = summary.processed,
            submitted = summary.submitted,
            "All workers have finished"
        );
        Ok(summary)
    }
}

/// Start a dispatcher, submit every message, then close and wait
pub async fn run_broadcast<I, M>(
    config: DispatchConfig,
    handler: Arc<dyn MessageHandler>,
    messages: I,
) -> Result<RunSummary>
where
    I: IntoIterator<Item = M>,
    M: Into<Message>,
{
    let mut dispatcher = Dispatcher::start(config, handler)?;
    dispatcher.submit_all(messages).await?;
    dispatcher.close_and_wait().await
}
