// Worker constants (no magic values)
use std::time::Duration;

/// Budget for a full default run (5 messages, 3 workers, 100ms each)
/// used by the daemon before it reports a stuck run
pub const RUN_TIMEOUT: Duration = Duration::from_secs(10);
