//! Per-invocation retry bookkeeping.

use rand::Rng;
use std::time::{Duration, Instant};

/// Largest exponent used for the backoff upper bound.
///
/// `2^63` seconds still fits in a [`Duration`]; the retry count keeps
/// counting past it, only the bound stops growing.
pub const MAX_EXPONENT: u32 = 63;

/// What to do after a retriable failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Sleep for `wait`, then invoke the operation again.
    Retry {
        /// Retry index after any cold reset.
        retry: u32,
        /// Jittered wait drawn from `[0, 2^retry)` seconds.
        wait: Duration,
    },
    /// The retry count went past the cap.
    Exhausted {
        /// Retry index that exceeded the cap.
        retry: u32,
    },
}

/// Mutable state of one retry run.
///
/// A fresh state is created for every executor invocation and dropped when it
/// returns, so concurrent runs never share counters.
///
/// # Examples
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use retriable_core::retry::{Decision, RetryState};
/// use std::time::Instant;
///
/// let mut state = RetryState::new(Some(1));
/// let mut rng = StdRng::seed_from_u64(7);
///
/// assert!(matches!(
///     state.record_failure(Instant::now(), &mut rng),
///     Decision::Retry { retry: 1, .. }
/// ));
/// assert_eq!(
///     state.record_failure(Instant::now(), &mut rng),
///     Decision::Exhausted { retry: 2 }
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RetryState {
    retry: u32,
    last_failure: Option<Instant>,
    last_wait: Option<Duration>,
    max_retries: Option<u32>,
}

impl RetryState {
    /// Start a run with the given cap (`None` retries forever).
    pub fn new(max_retries: Option<u32>) -> Self {
        Self {
            retry: 0,
            last_failure: None,
            last_wait: None,
            max_retries,
        }
    }

    /// Current retry count.
    pub fn retry(&self) -> u32 {
        self.retry
    }

    /// Cap this run was started with.
    pub fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    /// Previously drawn wait, if any.
    pub fn last_wait(&self) -> Option<Duration> {
        self.last_wait
    }

    /// Register a retriable failure observed at `now` and decide what follows.
    ///
    /// The cap is checked before the cold-reset rule, and the reset compares
    /// the gap against the wait drawn for the *previous* failure. Only then is
    /// the next wait drawn, from the possibly reset count.
    pub fn record_failure<R: Rng>(&mut self, now: Instant, rng: &mut R) -> Decision {
        self.retry = self.retry.saturating_add(1);

        if let Some(max) = self.max_retries
            && self.retry > max
        {
            return Decision::Exhausted { retry: self.retry };
        }

        if let (Some(last_failure), Some(last_wait)) = (self.last_failure, self.last_wait) {
            let elapsed = now.saturating_duration_since(last_failure);
            // A zero wait carries no window to compare against.
            if !last_wait.is_zero() && elapsed >= last_wait.saturating_mul(2) {
                self.retry = 1;
            }
        }
        self.last_failure = Some(now);

        let wait = draw_wait(self.retry, rng);
        self.last_wait = Some(wait);

        Decision::Retry {
            retry: self.retry,
            wait,
        }
    }
}

/// Upper bound, in seconds, of the wait drawn for `retry`.
pub(crate) fn wait_upper_bound(retry: u32) -> f64 {
    2f64.powi(retry.min(MAX_EXPONENT) as i32)
}

fn draw_wait<R: Rng>(retry: u32, rng: &mut R) -> Duration {
    Duration::from_secs_f64(rng.gen_range(0.0..wait_upper_bound(retry)))
}
