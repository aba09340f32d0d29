//! Shared fakes for integration tests.

#![allow(dead_code)]

use retriable_core::retry::Classify;

/// Error kinds used by the scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    TransientError,
    FatalError,
}

/// A classified test error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct TestError {
    pub kind: Kind,
    pub message: String,
}

impl TestError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            kind: Kind::TransientError,
            message: message.into(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            kind: Kind::FatalError,
            message: message.into(),
        }
    }
}

impl Classify for TestError {
    type Kind = Kind;

    fn kind(&self) -> Kind {
        self.kind
    }
}

/// Run `f` with a subscriber that captures formatted log messages, one per line.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer(Arc::new(Mutex::new(Vec::new())));
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_level(false)
        .with_target(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap().clone();
    let lines = String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| line.trim().to_string())
        .collect();
    (result, lines)
}

/// Retry indices parsed from `[Retryable error n/...]` lines.
pub fn retry_indices(lines: &[String]) -> Vec<u32> {
    lines
        .iter()
        .filter_map(|line| line.strip_prefix("[Retryable error "))
        .filter_map(|rest| rest.split('/').next())
        .filter_map(|n| n.parse().ok())
        .collect()
}
