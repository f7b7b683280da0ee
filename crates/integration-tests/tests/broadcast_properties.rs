//! Broadcast properties
//!
//! Black-box checks of the dispatcher through its public API: exactly-once
//! delivery, completion semantics, backpressure and termination.

use std::sync::Arc;
use std::time::Duration;

use fanout_core::application::{run_broadcast, Dispatcher};
use fanout_core::domain::{DispatchConfig, Message};
use fanout_core::port::message_handler::mocks::RecordingHandler;
use fanout_core::port::SimulatedHandler;

fn messages(n: usize) -> Vec<Message> {
    (0..n).map(|i| Message::from(format!("msg-{}", i))).collect()
}

/// Every message is processed by exactly one worker exactly once
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_exactly_once_delivery() {
    for (workers, capacity, count) in [(1, 1, 7), (3, 5, 15), (4, 2, 40), (8, 5, 3)] {
        let handler = RecordingHandler::with_delay(Duration::from_millis(1));
        let input = messages(count);

        let summary = run_broadcast(
            DispatchConfig::new(workers, capacity),
            Arc::new(handler.clone()),
            input.clone(),
        )
        .await
        .unwrap();

        let mut expected = input;
        expected.sort();
        assert_eq!(
            handler.sorted_messages(),
            expected,
            "multiset mismatch for workers={} capacity={}",
            workers,
            capacity
        );
        assert_eq!(summary.processed, count);
        assert_eq!(summary.submitted, count);
    }
}

/// Duplicate contents are distinct messages and each is delivered once
#[tokio::test]
async fn test_duplicate_contents_are_not_collapsed() {
    let handler = RecordingHandler::new();
    let input = vec!["same", "same", "same", "other"];

    run_broadcast(DispatchConfig::new(3, 5), Arc::new(handler.clone()), input)
        .await
        .unwrap();

    let delivered = handler.sorted_messages();
    assert_eq!(
        delivered,
        vec![
            Message::from("other"),
            Message::from("same"),
            Message::from("same"),
            Message::from("same"),
        ]
    );
}

/// close_and_wait returns only once every worker has exited
#[tokio::test]
async fn test_close_and_wait_leaves_no_workers() {
    let handler = RecordingHandler::with_delay(Duration::from_millis(20));
    let mut dispatcher =
        Dispatcher::start(DispatchConfig::new(3, 5), Arc::new(handler.clone())).unwrap();

    dispatcher.submit_all(messages(6)).await.unwrap();
    // Workers only exit once the queue is closed
    assert_eq!(dispatcher.remaining_workers(), 3);

    let summary = dispatcher.close_and_wait().await.unwrap();
    assert_eq!(summary.remaining_workers, 0);
    assert_eq!(summary.processed, 6);
    assert_eq!(handler.call_count(), 6);
}

/// With no workers draining, submitting past capacity blocks
#[tokio::test]
async fn test_submit_blocks_when_full_and_undrained() {
    let mut dispatcher =
        Dispatcher::start(DispatchConfig::new(0, 5), Arc::new(RecordingHandler::new())).unwrap();

    for m in messages(5) {
        tokio::time::timeout(Duration::from_millis(100), dispatcher.submit(m))
            .await
            .expect("submit within capacity must not block")
            .unwrap();
    }

    let blocked = tokio::time::timeout(Duration::from_millis(200), dispatcher.submit("sixth")).await;
    assert!(blocked.is_err(), "sixth submit should block on a full queue");

    let summary = dispatcher.close_and_wait().await.unwrap();
    assert_eq!(summary.submitted, 5);
    assert_eq!(summary.processed, 0);
}

/// A blocked submit resumes once a worker frees a slot
#[tokio::test]
async fn test_blocked_submit_resumes_when_drained() {
    let handler = RecordingHandler::with_delay(Duration::from_millis(30));
    let mut dispatcher =
        Dispatcher::start(DispatchConfig::new(1, 1), Arc::new(handler.clone())).unwrap();

    tokio::time::timeout(Duration::from_secs(2), dispatcher.submit_all(messages(4)))
        .await
        .expect("a draining worker must unblock the producer")
        .unwrap();

    let summary = dispatcher.close_and_wait().await.unwrap();
    assert_eq!(summary.processed, 4);
}

/// 3 workers, 5 messages: everything processed, no deadlock
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_default_run_terminates() {
    let config = DispatchConfig::default().with_latency(Duration::from_millis(100));
    let input = ["alpha", "beta", "gamma", "delta", "epsilon"];

    let summary = tokio::time::timeout(
        Duration::from_secs(5),
        run_broadcast(
            config.clone(),
            Arc::new(SimulatedHandler::new(config.processing_latency())),
            input,
        ),
    )
    .await
    .expect("run must terminate within the time budget")
    .unwrap();

    assert_eq!(summary.workers, 3);
    assert_eq!(summary.processed, 5);
    assert_eq!(summary.remaining_workers, 0);
}

/// Work is spread across workers when processing is slow
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_multiple_workers_participate() {
    let handler = RecordingHandler::with_delay(Duration::from_millis(50));

    run_broadcast(
        DispatchConfig::new(3, 5),
        Arc::new(handler.clone()),
        messages(6),
    )
    .await
    .unwrap();

    let mut workers: Vec<usize> = handler.deliveries().into_iter().map(|(w, _)| w).collect();
    workers.sort_unstable();
    workers.dedup();
    assert!(workers.len() > 1, "expected more than one worker, got {:?}", workers);
    assert!(workers.iter().all(|w| (1..=3).contains(w)));
}
