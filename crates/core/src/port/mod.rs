// Port Layer - Interfaces for pluggable behavior

pub mod message_handler;

// Re-exports
pub use message_handler::{MessageHandler, SimulatedHandler};
