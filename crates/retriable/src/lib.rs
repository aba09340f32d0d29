//! Retry-with-backoff for blocking and async operations, plus the small
//! process helpers that usually sit next to a retry loop in a command-line
//! tool.
//!
//! # Architecture
//!
//! - **Retry executor** (re-exported from `retriable-core`): full-jitter
//!   exponential backoff, optional cap, cold-streak reset
//! - **Scoped SIGINT**: run a unit of work with the default interrupt
//!   disposition, restored afterwards on every exit path (unix only)
//! - **Outcome codes**: map error kinds to integer codes
//! - **Parsing and lookup**: `key=value` lists, first existing path
//!
//! # Usage
//!
//! ```rust
//! use retriable::{RetriableSet, RetryExecutor};
//! use std::io;
//!
//! let executor = RetryExecutor::builder().max_retries(3).build();
//! let retriable = RetriableSet::from([io::ErrorKind::TimedOut, io::ErrorKind::Interrupted]);
//!
//! let value = executor.execute(&retriable, || Ok::<_, io::Error>(7))?;
//! assert_eq!(value, 7);
//! # Ok::<(), io::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod outcome;
pub mod parse;
pub mod paths;
#[cfg(unix)]
pub mod signal;

// Re-export commonly used types
pub use outcome::{OutcomeCodes, catch_errors};
pub use parse::{ParseError, parse_key_values};
pub use paths::first_existing;
pub use retriable_core::config::RetryConfig;
pub use retriable_core::error::ConfigError;
pub use retriable_core::retry::{
    Classify, Clock, ManualTime, RetriableSet, RetryExecutor, RetryExecutorBuilder, Sleeper,
    SystemClock, ThreadSleeper, retry,
};
#[cfg(unix)]
pub use signal::{SigintGuard, SignalError, default_sigint, with_default_sigint};
