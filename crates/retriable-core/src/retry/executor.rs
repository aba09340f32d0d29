//! The blocking retry executor.

use super::classify::{Classify, RetriableSet};
use super::event::RetryEvent;
use super::state::{Decision, RetryState};
use super::time::{Clock, Sleeper, SystemClock, ThreadSleeper};
use crate::config::RetryConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::time::{Duration, Instant};

/// Runs an operation until it succeeds, fails with a non-retriable error, or
/// runs out of retries.
///
/// Waits follow full-jitter exponential backoff: after the `n`-th consecutive
/// retriable failure the executor sleeps a uniformly random duration in
/// `[0, 2^n)` seconds. When failures are spaced at least twice the previous
/// wait apart the count drops back to 1, so a long-lived process with rare
/// failures does not keep escalating.
///
/// The executor holds configuration only. Each call to [`execute`] builds its
/// own [`RetryState`] and random generator, so one executor may be shared
/// between threads.
///
/// # Examples
///
/// ```rust
/// use retriable_core::retry::{RetriableSet, RetryExecutor};
/// use std::io;
///
/// let executor = RetryExecutor::builder()
///     .max_retries(3)
///     .build();
///
/// let retriable = RetriableSet::from([io::ErrorKind::TimedOut]);
/// let mut attempts = 0;
///
/// let result = executor.execute(&retriable, || {
///     attempts += 1;
///     Err::<(), _>(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
/// });
///
/// // Not retriable: returned after a single attempt.
/// assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
/// assert_eq!(attempts, 1);
/// ```
///
/// [`execute`]: RetryExecutor::execute
#[derive(Debug, Clone)]
pub struct RetryExecutor<S = ThreadSleeper, C = SystemClock> {
    pub(super) max_retries: Option<u32>,
    seed: Option<u64>,
    sleeper: S,
    clock: C,
}

impl RetryExecutor {
    /// Create a new builder. Defaults to unlimited retries, an entropy-seeded
    /// generator, real sleeps and the system clock.
    pub fn builder() -> RetryExecutorBuilder {
        RetryExecutorBuilder::default()
    }

    /// Build an executor from loaded configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retriable_core::config::RetryConfig;
    /// use retriable_core::retry::RetryExecutor;
    ///
    /// let config = RetryConfig { max_retries: Some(4), seed: None };
    /// let executor = RetryExecutor::from_config(&config);
    /// assert_eq!(executor.max_retries(), Some(4));
    /// ```
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::builder().config(config).build()
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl<S, C> RetryExecutor<S, C> {
    /// The configured cap, `None` when unlimited.
    pub fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    /// The configured seed, if runs are meant to be reproducible.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub(super) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl<S: Sleeper, C: Clock> RetryExecutor<S, C> {
    /// Invoke `operation`, retrying errors whose kind is in `retriable`.
    ///
    /// Returns the first `Ok` value. Errors are never wrapped: a non-retriable
    /// error, or the retriable error that exceeded the cap, comes back exactly
    /// as the operation produced it.
    ///
    /// Blocks the calling thread while waiting between attempts.
    pub fn execute<T, E, F>(
        &self,
        retriable: &RetriableSet<E::Kind>,
        mut operation: F,
    ) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        E: Classify + fmt::Display,
    {
        let mut state = RetryState::new(self.max_retries);
        let mut rng = self.rng();

        loop {
            match operation() {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let wait =
                        handle_failure(&mut state, &mut rng, retriable, err, || self.clock.now())?;
                    self.sleeper.sleep(wait);
                }
            }
        }
    }
}

/// Classify a failure, update `state`, and either hand back the wait before
/// the next attempt or the error to return.
pub(super) fn handle_failure<E, N>(
    state: &mut RetryState,
    rng: &mut StdRng,
    retriable: &RetriableSet<E::Kind>,
    err: E,
    now: N,
) -> Result<Duration, E>
where
    E: Classify + fmt::Display,
    N: FnOnce() -> Instant,
{
    let kind = err.kind();
    if !retriable.contains(&kind) {
        RetryEvent::non_retryable(&kind, &err).emit();
        return Err(err);
    }

    match state.record_failure(now(), rng) {
        Decision::Exhausted { .. } => {
            RetryEvent::LimitReached.emit();
            Err(err)
        }
        Decision::Retry { retry, wait } => {
            RetryEvent::retrying(retry, state.max_retries(), &kind, &err, wait).emit();
            Ok(wait)
        }
    }
}

/// Run `operation` with a default executor capped at `max_retries`.
///
/// Shorthand for building a [`RetryExecutor`] and calling
/// [`execute`](RetryExecutor::execute) once.
///
/// # Examples
///
/// ```rust
/// use retriable_core::retry::{RetriableSet, retry};
/// use std::io;
///
/// let retriable = RetriableSet::from([io::ErrorKind::Interrupted]);
/// let value = retry(|| Ok::<_, io::Error>("ready"), &retriable, Some(2)).unwrap();
/// assert_eq!(value, "ready");
/// ```
pub fn retry<T, E, F>(
    operation: F,
    retriable: &RetriableSet<E::Kind>,
    max_retries: Option<u32>,
) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: Classify + fmt::Display,
{
    RetryExecutor::builder()
        .retry_limit(max_retries)
        .build()
        .execute(retriable, operation)
}

/// Builder for configuring [`RetryExecutor`].
///
/// # Examples
///
/// ```rust
/// use retriable_core::retry::RetryExecutor;
///
/// let executor = RetryExecutor::builder()
///     .max_retries(5)
///     .seed(1234)
///     .build();
///
/// assert_eq!(executor.max_retries(), Some(5));
/// assert_eq!(executor.seed(), Some(1234));
/// ```
#[derive(Debug, Clone)]
pub struct RetryExecutorBuilder<S = ThreadSleeper, C = SystemClock> {
    max_retries: Option<u32>,
    seed: Option<u64>,
    sleeper: S,
    clock: C,
}

impl Default for RetryExecutorBuilder {
    fn default() -> Self {
        Self {
            max_retries: None,
            seed: None,
            sleeper: ThreadSleeper,
            clock: SystemClock,
        }
    }
}

impl<S, C> RetryExecutorBuilder<S, C> {
    /// Give up once the retry count exceeds `max_retries`.
    ///
    /// With `max_retries(m)` an always-failing operation runs `m + 1` times.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Set or clear the cap. `None` retries forever.
    pub fn retry_limit(mut self, max_retries: Option<u32>) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Apply the cap and seed from loaded configuration.
    pub fn config(mut self, config: &RetryConfig) -> Self {
        self.max_retries = config.max_retries;
        self.seed = config.seed;
        self
    }

    /// Seed the jitter generator so runs with identical failures produce
    /// identical waits.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the sleeper used between attempts.
    pub fn sleeper<S2>(self, sleeper: S2) -> RetryExecutorBuilder<S2, C> {
        RetryExecutorBuilder {
            max_retries: self.max_retries,
            seed: self.seed,
            sleeper,
            clock: self.clock,
        }
    }

    /// Replace the clock used by the cold-reset rule.
    pub fn clock<C2>(self, clock: C2) -> RetryExecutorBuilder<S, C2> {
        RetryExecutorBuilder {
            max_retries: self.max_retries,
            seed: self.seed,
            sleeper: self.sleeper,
            clock,
        }
    }

    /// Build the executor.
    pub fn build(self) -> RetryExecutor<S, C> {
        RetryExecutor {
            max_retries: self.max_retries,
            seed: self.seed,
            sleeper: self.sleeper,
            clock: self.clock,
        }
    }
}
