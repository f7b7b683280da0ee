// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Queue is full (capacity {0})")]
    QueueFull(usize),

    #[error("Queue is closed")]
    QueueClosed,

    #[error("Recovered fault: {0}")]
    Fault(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
