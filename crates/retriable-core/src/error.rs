//! Error types for this crate's own fallible operations.
//!
//! The retry loop itself never produces errors of its own; it hands back the
//! operation's error untouched. These types cover configuration loading.

use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading [`RetryConfig`](crate::config::RetryConfig).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable was set but could not be parsed.
    #[error("invalid value {value:?} for {var}: expected a non-negative integer")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value found in the environment.
        value: String,
    },
}
