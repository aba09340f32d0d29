//! Async counterpart of the executor for callers already on a tokio runtime.

use super::classify::{Classify, RetriableSet};
use super::executor::{RetryExecutor, handle_failure};
use super::state::RetryState;
use std::fmt;
use std::future::Future;

impl<S, C> RetryExecutor<S, C> {
    /// Like [`execute`](RetryExecutor::execute), but awaits the operation and
    /// waits with [`tokio::time::sleep`] instead of blocking the thread.
    ///
    /// Timestamps for the cold-reset rule come from [`tokio::time::Instant`],
    /// so a paused test runtime drives both the waits and the reset window.
    /// The configured sleeper and clock are not used.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retriable_core::retry::{RetriableSet, RetryExecutor};
    /// use std::io;
    ///
    /// # async fn example() -> Result<(), io::Error> {
    /// let executor = RetryExecutor::builder().max_retries(3).build();
    /// let retriable = RetriableSet::from([io::ErrorKind::ConnectionRefused]);
    ///
    /// let body = executor
    ///     .execute_async(&retriable, || async { Ok::<_, io::Error>("pong") })
    ///     .await?;
    /// assert_eq!(body, "pong");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute_async<T, E, F, Fut>(
        &self,
        retriable: &RetriableSet<E::Kind>,
        mut operation: F,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Classify + fmt::Display,
    {
        let mut state = RetryState::new(self.max_retries);
        let mut rng = self.rng();

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let wait = handle_failure(&mut state, &mut rng, retriable, err, || {
                        tokio::time::Instant::now().into_std()
                    })?;
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}
