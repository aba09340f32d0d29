//! Diagnostic lines emitted by the retry loop.

use std::fmt;
use std::time::Duration;

/// One diagnostic emitted by the executor.
///
/// The `Display` impl produces the exact log text, so hosts that scrape
/// stderr keep working regardless of the `tracing` formatter in use.
///
/// # Examples
///
/// ```rust
/// use retriable_core::retry::RetryEvent;
/// use std::time::Duration;
///
/// let event = RetryEvent::Retrying {
///     retry: 2,
///     max_retries: None,
///     kind: "TimedOut".to_string(),
///     message: String::new(),
///     wait: Duration::from_millis(1300),
/// };
/// assert_eq!(
///     event.to_string(),
///     "[Retryable error 2/-] TimedOut (-). Wait 1.3 seconds"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RetryEvent {
    /// A retriable failure that will be retried after `wait`.
    Retrying {
        /// Retry index.
        retry: u32,
        /// Cap, if any.
        max_retries: Option<u32>,
        /// Error kind name.
        kind: String,
        /// Error message, possibly empty.
        message: String,
        /// Wait before the next attempt.
        wait: Duration,
    },
    /// A failure outside the retriable set.
    NonRetryable {
        /// Error kind name.
        kind: String,
        /// Error message, possibly empty.
        message: String,
    },
    /// A retriable failure past the cap.
    LimitReached,
}

impl RetryEvent {
    /// Build a [`RetryEvent::Retrying`] from a classified error.
    pub(crate) fn retrying(
        retry: u32,
        max_retries: Option<u32>,
        kind: &impl fmt::Debug,
        error: &impl fmt::Display,
        wait: Duration,
    ) -> Self {
        Self::Retrying {
            retry,
            max_retries,
            kind: format!("{:?}", kind),
            message: error.to_string(),
            wait,
        }
    }

    /// Build a [`RetryEvent::NonRetryable`] from a classified error.
    pub(crate) fn non_retryable(kind: &impl fmt::Debug, error: &impl fmt::Display) -> Self {
        Self::NonRetryable {
            kind: format!("{:?}", kind),
            message: error.to_string(),
        }
    }

    /// Emit this event through `tracing`.
    pub(crate) fn emit(&self) {
        match self {
            Self::Retrying { .. } | Self::NonRetryable { .. } => tracing::warn!("{}", self),
            Self::LimitReached => tracing::error!("{}", self),
        }
    }
}

/// Placeholder used in log lines for an empty message: empty text renders
/// as `-`.
///
/// ```rust
/// use retriable_core::retry::or_dash;
///
/// assert_eq!(or_dash(""), "-");
/// assert_eq!(or_dash("refused"), "refused");
/// ```
pub fn or_dash(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}

impl fmt::Display for RetryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retrying {
                retry,
                max_retries,
                kind,
                message,
                wait,
            } => {
                write!(f, "[Retryable error {}/", retry)?;
                match max_retries {
                    Some(max) => write!(f, "{}", max)?,
                    None => f.write_str("-")?,
                }
                write!(
                    f,
                    "] {} ({}). Wait {:.1} seconds",
                    kind,
                    or_dash(message),
                    wait.as_secs_f64()
                )
            }
            Self::NonRetryable { kind, message } => {
                write!(f, "[Non-Retryable error] {} ({}).", kind, or_dash(message))
            }
            Self::LimitReached => f.write_str("[Retryable errors] Retry limit reached"),
        }
    }
}
