// Scoped fault boundary
use crate::error::AppError;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Mutex;
use tracing::error;

/// Result of a panic-guarded execution
#[derive(Debug, PartialEq, Eq)]
pub enum PanicGuardResult<T> {
    /// Execution completed successfully
    Success(T),
    /// Execution panicked; carries the recovered panic message
    Panicked(String),
}

impl<T> PanicGuardResult<T> {
    /// Convert into a normal error value at the guard boundary
    pub fn into_result(self) -> crate::Result<T> {
        match self {
            PanicGuardResult::Success(value) => Ok(value),
            PanicGuardResult::Panicked(msg) => Err(AppError::Fault(msg)),
        }
    }
}

/// Execute a closure with panic isolation
///
/// If the closure panics, the panic is caught and returned as
/// `PanicGuardResult::Panicked`. Nothing crosses the guard.
///
/// # Example
/// ```text
/// let result = execute_guarded(|| {
///     panic!("test panic");
/// });
///
/// match result {
///     PanicGuardResult::Panicked(msg) => {
///         println!("Recovered from panic: {}", msg);
///     }
///     _ => {}
/// }
/// ```
pub fn execute_guarded<F, T>(f: F) -> PanicGuardResult<T>
where
    F: FnOnce() -> T,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => PanicGuardResult::Success(result),
        Err(payload) => {
            let panic_msg = panic_message(&*payload);
            error!(panic_msg = %panic_msg, "Guarded scope panicked");
            PanicGuardResult::Panicked(panic_msg)
        }
    }
}

// Serializes hook swaps so concurrent quiet guards restore the right hook
static HOOK_SWAP: Mutex<()> = Mutex::new(());

/// Like `execute_guarded`, but the process panic hook stays silent while `f` runs.
///
/// The fault is reported only through the returned value and the `error!`
/// log; nothing is written to stderr. The previous hook is restored before
/// returning.
pub fn execute_guarded_quiet<F, T>(f: F) -> PanicGuardResult<T>
where
    F: FnOnce() -> T,
{
    let _swap = HOOK_SWAP.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));
    let result = execute_guarded(f);
    std::panic::set_hook(previous);
    result
}

/// Execute a future with panic isolation
///
/// The future runs on its own tokio task so an unwind is observed through the
/// `JoinHandle` instead of tearing down the caller.
pub async fn execute_guarded_async<F, T>(future: F) -> PanicGuardResult<T>
where
    F: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn(future).await {
        Ok(value) => PanicGuardResult::Success(value),
        Err(join_err) if join_err.is_panic() => {
            let payload = join_err.into_panic();
            let panic_msg = panic_message(&*payload);
            error!(panic_msg = %panic_msg, "Guarded async task panicked");
            PanicGuardResult::Panicked(panic_msg)
        }
        Err(join_err) => PanicGuardResult::Panicked(join_err.to_string()),
    }
}

fn panic_message(payload: &(dyn Any + Send + 'static)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
