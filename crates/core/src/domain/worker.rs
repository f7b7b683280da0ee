// Worker Domain Model

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Worker identifier (1-based, assigned at spawn)
pub type WorkerId = usize;

/// Worker lifecycle state
///
/// `Idle -> Processing -> Idle` loops until the queue is closed and drained,
/// then `Idle -> Done`. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerState {
    Idle,
    Processing,
    Done,
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerState::Idle => write!(f, "IDLE"),
            WorkerState::Processing => write!(f, "PROCESSING"),
            WorkerState::Done => write!(f, "DONE"),
        }
    }
}

/// Lifecycle tracker owned by a single worker task
#[derive(Debug, Clone)]
pub struct WorkerLifecycle {
    pub id: WorkerId,
    pub state: WorkerState,
    pub processed: usize,
}

impl WorkerLifecycle {
    pub fn new(id: WorkerId) -> Self {
        Self {
            id,
            state: WorkerState::Idle,
            processed: 0,
        }
    }

    /// Transition to Processing (a message was dequeued)
    pub fn begin(&mut self) -> Result<()> {
        self.transition(WorkerState::Idle, WorkerState::Processing)
    }

    /// Transition back to Idle (the in-flight message is finished)
    pub fn finish(&mut self) -> Result<()> {
        self.transition(WorkerState::Processing, WorkerState::Idle)?;
        self.processed += 1;
        Ok(())
    }

    /// Transition to Done (queue observed closed and empty)
    pub fn retire(&mut self) -> Result<()> {
        self.transition(WorkerState::Idle, WorkerState::Done)
    }

    pub fn is_done(&self) -> bool {
        self.state == WorkerState::Done
    }

    fn transition(&mut self, expected: WorkerState, to: WorkerState) -> Result<()> {
        if self.state != expected {
            return Err(DomainError::InvalidStateTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_loop_then_done() {
        let mut w = WorkerLifecycle::new(1);
        assert_eq!(w.state, WorkerState::Idle);

        w.begin().unwrap();
        assert_eq!(w.state, WorkerState::Processing);
        w.finish().unwrap();
        w.begin().unwrap();
        w.finish().unwrap();
        w.retire().unwrap();

        assert!(w.is_done());
        assert_eq!(w.processed, 2);
    }

    #[test]
    fn test_cannot_retire_while_processing() {
        let mut w = WorkerLifecycle::new(2);
        w.begin().unwrap();

        let err = w.retire().unwrap_err();
        assert!(err.to_string().contains("PROCESSING -> DONE"));
        assert_eq!(w.state, WorkerState::Processing);
    }

    #[test]
    fn test_done_is_terminal() {
        let mut w = WorkerLifecycle::new(3);
        w.retire().unwrap();

        assert!(w.begin().is_err());
        assert!(w.retire().is_err());
        assert_eq!(w.processed, 0);
    }
}
