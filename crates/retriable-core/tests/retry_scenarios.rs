//! End-to-end behavior of the blocking executor against virtual time.

mod common;

use common::{Kind, TestError, capture_logs, retry_indices};
use retriable_core::retry::{ManualTime, RetriableSet, RetryExecutor};
use std::cell::Cell;
use std::time::Duration;

fn transient_only() -> RetriableSet<Kind> {
    RetriableSet::from([Kind::TransientError])
}

#[test]
fn test_always_succeeding_operation_never_sleeps() {
    let time = ManualTime::new();
    let executor = RetryExecutor::builder()
        .max_retries(3)
        .sleeper(&time)
        .clock(&time)
        .build();
    let calls = Cell::new(0);

    let (result, logs) = capture_logs(|| {
        executor.execute(&transient_only(), || {
            calls.set(calls.get() + 1);
            Ok::<_, TestError>("payload")
        })
    });

    assert_eq!(result.unwrap(), "payload");
    assert_eq!(calls.get(), 1);
    assert_eq!(time.sleep_count(), 0);
    assert!(logs.is_empty(), "unexpected logs: {:?}", logs);
}

#[test]
fn test_non_retriable_error_is_returned_unchanged() {
    let time = ManualTime::new();
    let executor = RetryExecutor::builder()
        .max_retries(3)
        .sleeper(&time)
        .clock(&time)
        .build();
    let calls = Cell::new(0);

    let (result, logs) = capture_logs(|| {
        executor.execute(&transient_only(), || {
            calls.set(calls.get() + 1);
            Err::<(), _>(TestError::fatal("disk on fire"))
        })
    });

    assert_eq!(result.unwrap_err(), TestError::fatal("disk on fire"));
    assert_eq!(calls.get(), 1);
    assert_eq!(time.sleep_count(), 0);
    assert_eq!(logs, vec!["[Non-Retryable error] FatalError (disk on fire).".to_string()]);
}

#[test]
fn test_fails_three_times_then_succeeds_with_cap_three() {
    let time = ManualTime::new();
    let executor = RetryExecutor::builder()
        .max_retries(3)
        .seed(2024)
        .sleeper(&time)
        .clock(&time)
        .build();
    let calls = Cell::new(0);

    let (result, logs) = capture_logs(|| {
        executor.execute(&transient_only(), || {
            calls.set(calls.get() + 1);
            if calls.get() <= 3 {
                Err(TestError::transient("upstream busy"))
            } else {
                Ok(99)
            }
        })
    });

    assert_eq!(result.unwrap(), 99);
    assert_eq!(calls.get(), 4);
    assert_eq!(time.sleep_count(), 3);
    assert_eq!(retry_indices(&logs), vec![1, 2, 3]);

    for (sleep, retry) in time.sleeps().iter().zip(1..) {
        assert!(sleep.as_secs_f64() < 2f64.powi(retry));
    }
    for line in &logs {
        assert!(line.contains("/3] TransientError (upstream busy). Wait "), "{}", line);
        assert!(line.ends_with(" seconds"), "{}", line);
    }
}

#[test]
fn test_retry_budget_exhausted_returns_last_error() {
    let time = ManualTime::new();
    let executor = RetryExecutor::builder()
        .max_retries(4)
        .sleeper(&time)
        .clock(&time)
        .build();
    let calls = Cell::new(0);

    let (result, logs) = capture_logs(|| {
        executor.execute(&transient_only(), || {
            calls.set(calls.get() + 1);
            Err::<(), _>(TestError::transient(format!("try {}", calls.get())))
        })
    });

    assert_eq!(result.unwrap_err(), TestError::transient("try 5"));
    assert_eq!(calls.get(), 5);
    assert_eq!(time.sleep_count(), 4);
    assert_eq!(retry_indices(&logs), vec![1, 2, 3, 4]);
    assert_eq!(
        logs.last().map(String::as_str),
        Some("[Retryable errors] Retry limit reached")
    );
}

#[test]
fn test_empty_message_renders_dash() {
    let time = ManualTime::new();
    let executor = RetryExecutor::builder()
        .max_retries(1)
        .sleeper(&time)
        .clock(&time)
        .build();

    let (_, logs) = capture_logs(|| {
        executor.execute(&transient_only(), || Err::<(), _>(TestError::transient("")))
    });

    assert!(logs[0].starts_with("[Retryable error 1/1] TransientError (-). Wait "));
}

#[test]
fn test_uncapped_runs_until_stopped() {
    let time = ManualTime::new();
    let executor = RetryExecutor::builder()
        .seed(5)
        .sleeper(&time)
        .clock(&time)
        .build();
    let calls = Cell::new(0);

    // Only a non-retriable error ends an uncapped run.
    let (result, logs) = capture_logs(|| {
        executor.execute(&transient_only(), || {
            calls.set(calls.get() + 1);
            if calls.get() > 12 {
                Err::<(), _>(TestError::fatal("stop"))
            } else {
                Err(TestError::transient("again"))
            }
        })
    });

    assert_eq!(result.unwrap_err().kind, Kind::FatalError);
    assert_eq!(calls.get(), 13);
    assert_eq!(time.sleep_count(), 12);

    let indices = retry_indices(&logs);
    assert_eq!(indices, (1..=12).collect::<Vec<_>>());
    assert!(logs.iter().all(|line| !line.starts_with("[Retryable error") || line.contains("/-]")));
}

#[test]
fn test_sparse_failures_reset_the_streak() {
    let time = ManualTime::new();
    let executor = RetryExecutor::builder()
        .seed(17)
        .sleeper(&time)
        .clock(&time)
        .build();
    let calls = Cell::new(0);

    // Failures 1-3 arrive back to back. Before failure 4 the operation idles
    // for a minute, well past twice any wait drawn so far (< 8s).
    let (_, logs) = capture_logs(|| {
        executor.execute(&transient_only(), || {
            calls.set(calls.get() + 1);
            match calls.get() {
                4 => {
                    time.advance(Duration::from_secs(60));
                    Err(TestError::transient("late"))
                }
                n if n <= 5 => Err(TestError::transient("early")),
                _ => Ok(()),
            }
        })
    });

    assert_eq!(retry_indices(&logs), vec![1, 2, 3, 1, 2]);
}
