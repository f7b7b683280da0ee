// Domain Layer - Pure entities and rules

pub mod error;
pub mod message;
pub mod queue;
pub mod worker;

// Re-exports
pub use error::{ApplicationError, DomainError};
pub use message::Message;
pub use queue::DispatchConfig;
pub use worker::{WorkerId, WorkerLifecycle, WorkerState};
