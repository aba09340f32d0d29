#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Retry executor with jittered exponential backoff.
//!
//! This crate provides the retry loop used across the `retriable` workspace:
//!
//! - **Error classification** via the [`Classify`](retry::Classify) trait and a
//!   caller-supplied [`RetriableSet`](retry::RetriableSet)
//! - **Full-jitter exponential backoff**: each wait is drawn from `[0, 2^n)`
//!   seconds, where `n` is the current retry count
//! - **Cold-streak reset**: the retry count drops back to 1 once failures are
//!   spaced at least twice the previous wait apart
//! - **Optional retry cap**, after which the last error is returned unchanged
//!
//! # Examples
//!
//! Using the prelude for convenient imports:
//!
//! ```rust
//! use retriable_core::prelude::*;
//! use std::io;
//!
//! let executor = RetryExecutor::builder().max_retries(3).build();
//! let retriable = RetriableSet::from([io::ErrorKind::TimedOut]);
//!
//! let value = executor.execute(&retriable, || Ok::<_, io::Error>(42)).unwrap();
//! assert_eq!(value, 42);
//! ```

pub mod config;
pub mod error;
pub mod retry;

/// Convenient re-exports of commonly used items.
///
/// Import all core abstractions with:
///
/// ```rust
/// use retriable_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::RetryConfig;
    pub use crate::error::ConfigError;
    pub use crate::retry::{
        Classify, Clock, ManualTime, RetriableSet, RetryExecutor, RetryExecutorBuilder, Sleeper,
        SystemClock, ThreadSleeper, retry,
    };
}
