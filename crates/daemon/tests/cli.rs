// End-to-end checks against the built `fanout` binary

use std::process::{Command, Output};

fn run_fanout() -> Output {
    Command::new(env!("CARGO_BIN_EXE_fanout"))
        .env("FANOUT_LATENCY_MS", "1")
        .env("RUST_BACKTRACE", "1")
        .env_remove("FANOUT_MESSAGES")
        .env_remove("FANOUT_WORKERS")
        .env_remove("FANOUT_QUEUE_CAPACITY")
        .output()
        .expect("fanout binary should launch")
}

#[test]
fn test_forced_fault_is_silent_on_stderr() {
    let output = run_fanout();
    assert!(output.status.success(), "fanout exited with {}", output.status);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("panicked at"),
        "panic hook output leaked to stderr: {}",
        stderr
    );
    assert!(!stderr.contains("stack backtrace"));
}

#[test]
fn test_tour_prints_expected_lines() {
    let output = run_fanout();
    let stdout = String::from_utf8_lossy(&output.stdout);

    for expected in [
        "Recovered from panic: This is a forced panic!",
        "Greeter interface says: Hello, my name is Alice. I am 30 years old.",
        "Min of 3.14 and 2.71: 2.71",
        "All workers have finished.",
    ] {
        assert!(stdout.contains(expected), "missing {:?} in: {}", expected, stdout);
    }
}
