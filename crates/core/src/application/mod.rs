// Application Layer - Use cases

pub mod dispatcher;
pub mod tour;
pub mod worker;

// Re-exports
pub use dispatcher::{run_broadcast, Dispatcher, RunSummary};
pub use worker::{
    execute_guarded, execute_guarded_async, execute_guarded_quiet, PanicGuardResult, Worker,
};
