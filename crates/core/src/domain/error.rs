// Domain Error Types

use thiserror::Error;

/// Illustrative application error carrying a numeric code and a message.
///
/// Constructed and printed only; never retried or wrapped by the dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ApplicationError - code: {code}, message: {message}")]
pub struct ApplicationError {
    pub code: i32,
    pub message: String,
}

impl ApplicationError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid worker state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Application(#[from] ApplicationError),
}

pub type Result<T> = std::result::Result<T, DomainError>;
