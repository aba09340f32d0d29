//! Retry loop, backoff schedule, and the seams it runs on.
//!
//! # Key Types
//!
//! - [`RetryExecutor`] - runs an operation until success, a non-retriable
//!   error, or an exhausted retry budget
//! - [`Classify`] / [`RetriableSet`] - which error kinds are worth retrying
//! - [`Sleeper`] / [`Clock`] - how the executor waits and reads time
//! - [`ManualTime`] - virtual time for tests and simulations
//!
//! # Examples
//!
//! ```rust
//! use retriable_core::retry::{RetriableSet, RetryExecutor};
//! use std::io;
//!
//! let executor = RetryExecutor::builder().max_retries(5).build();
//! let retriable = RetriableSet::from([io::ErrorKind::ConnectionReset]);
//!
//! let result = executor.execute(&retriable, || {
//!     // Your operation here
//!     Ok::<_, io::Error>("done")
//! });
//! assert_eq!(result.unwrap(), "done");
//! ```

mod classify;
mod event;
mod executor;
mod nonblocking;
mod state;
mod time;

pub use classify::{Classify, RetriableSet};
pub use event::{RetryEvent, or_dash};
pub use executor::{RetryExecutor, RetryExecutorBuilder, retry};
pub use state::{Decision, MAX_EXPONENT, RetryState};
pub use time::{Clock, ManualTime, Sleeper, SystemClock, ThreadSleeper};
