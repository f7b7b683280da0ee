// Worker Completion Signal

use tokio::sync::watch;

/// Dispatcher side: waits until every spawned worker has exited
pub struct CompletionWaiter {
    rx: watch::Receiver<usize>,
}

impl CompletionWaiter {
    /// Number of workers that have not yet signaled completion
    pub fn remaining(&self) -> usize {
        *self.rx.borrow()
    }

    /// Wait until the outstanding count reaches zero
    pub async fn wait(&mut self) {
        // Err only if every sender is gone, which implies every guard dropped
        let _ = self.rx.wait_for(|remaining| *remaining == 0).await;
    }
}

/// Worker side: decrements the outstanding count exactly once, on drop
///
/// Dropping covers both the normal exit path and an unwinding task.
pub struct CompletionGuard {
    tx: watch::Sender<usize>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.tx.send_modify(|remaining| *remaining = remaining.saturating_sub(1));
    }
}

/// Create a completion counter for `workers` workers
pub fn completion_channel(workers: usize) -> (CompletionWaiter, Vec<CompletionGuard>) {
    let (tx, rx) = watch::channel(workers);
    let guards = (0..workers)
        .map(|_| CompletionGuard { tx: tx.clone() })
        .collect();
    (CompletionWaiter { rx }, guards)
}
