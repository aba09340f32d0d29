//! Pluggable waiting and time reading for the blocking executor.

use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

/// Blocks the calling thread between attempts.
///
/// Production code uses [`ThreadSleeper`]; tests substitute a recorder so no
/// real time passes.
pub trait Sleeper {
    /// Suspend for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Source of the timestamps used by the cold-reset rule.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// [`Sleeper`] backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// [`Clock`] backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Virtual time for driving the executor without blocking.
///
/// Sleeping records the requested wait and moves the clock forward by it, so
/// consecutive failures are spaced exactly one wait apart. [`advance`] adds
/// idle time on top, which is how a streak is made to go cold.
///
/// Pass it by reference as both sleeper and clock.
///
/// # Examples
///
/// ```rust
/// use retriable_core::retry::{ManualTime, RetriableSet, RetryExecutor};
/// use std::io;
///
/// let time = ManualTime::new();
/// let executor = RetryExecutor::builder()
///     .max_retries(2)
///     .sleeper(&time)
///     .clock(&time)
///     .build();
///
/// let retriable = RetriableSet::from([io::ErrorKind::TimedOut]);
/// let result = executor.execute(&retriable, || {
///     Err::<(), _>(io::Error::from(io::ErrorKind::TimedOut))
/// });
///
/// assert!(result.is_err());
/// assert_eq!(time.sleeps().len(), 2);
/// ```
///
/// [`advance`]: ManualTime::advance
#[derive(Debug)]
pub struct ManualTime {
    origin: Instant,
    elapsed: Cell<Duration>,
    sleeps: RefCell<Vec<Duration>>,
}

impl ManualTime {
    /// Start at the current instant with nothing slept.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    /// Move the clock forward without recording a sleep.
    pub fn advance(&self, duration: Duration) {
        self.elapsed.set(self.elapsed.get() + duration);
    }

    /// Every wait requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }

    /// Number of waits requested so far.
    pub fn sleep_count(&self) -> usize {
        self.sleeps.borrow().len()
    }
}

impl Default for ManualTime {
    fn default() -> Self {
        Self::new()
    }
}

impl Sleeper for ManualTime {
    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration);
    }
}

impl Clock for ManualTime {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
