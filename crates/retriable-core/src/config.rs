//! Configuration for the retry executor

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the retry cap.
pub const ENV_MAX_RETRIES: &str = "RETRIABLE_MAX_RETRIES";

/// Environment variable holding the jitter seed.
pub const ENV_SEED: &str = "RETRIABLE_SEED";

/// Retry settings that can be read from a config file or the environment.
///
/// Both fields default to `None`: retry forever, with an entropy-seeded
/// jitter generator.
///
/// # Examples
///
/// ```rust
/// use retriable_core::config::RetryConfig;
///
/// let config: RetryConfig = toml::from_str("max_retries = 5").unwrap();
/// assert_eq!(config.max_retries, Some(5));
/// assert_eq!(config.seed, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retriable failures before giving up
    pub max_retries: Option<u32>,

    /// Seed for the jitter generator, for reproducible waits
    pub seed: Option<u64>,
}

impl RetryConfig {
    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `RETRIABLE_MAX_RETRIES`: retry cap
    /// - `RETRIABLE_SEED`: jitter seed
    ///
    /// Unset variables keep their defaults. Set but unparsable values are
    /// reported rather than ignored.
    pub fn from_env() -> Result<Self> {
        use std::env;

        let mut config = Self::default();

        if let Ok(raw) = env::var(ENV_MAX_RETRIES) {
            config.max_retries = Some(parse_env(ENV_MAX_RETRIES, &raw)?);
        }

        if let Ok(raw) = env::var(ENV_SEED) {
            config.seed = Some(parse_env(ENV_SEED, &raw)?);
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    pub fn merge(mut self, other: RetryConfig) -> Self {
        if other.max_retries.is_some() {
            self.max_retries = other.max_retries;
        }
        if other.seed.is_some() {
            self.seed = other.seed;
        }
        self
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: raw.to_string(),
    })
}
