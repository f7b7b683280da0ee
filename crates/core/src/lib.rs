// Fanout Core - Domain Logic & Ports
// NO adapter dependencies: the binary crate wires everything together

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};
