//! Map classified errors to integer outcome codes.

use retriable_core::retry::{Classify, or_dash};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Outcome code for an operation that completed without error.
pub const SUCCESS: i32 = 0;

/// Integer code for each error kind the caller wants to absorb.
///
/// # Examples
///
/// ```rust
/// use retriable::outcome::OutcomeCodes;
/// use std::io;
///
/// let codes = OutcomeCodes::from([
///     (io::ErrorKind::NotFound, 2),
///     (io::ErrorKind::PermissionDenied, 13),
/// ]);
/// assert_eq!(codes.code(&io::ErrorKind::NotFound), Some(2));
/// assert_eq!(codes.code(&io::ErrorKind::TimedOut), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeCodes<K: Eq + Hash> {
    codes: HashMap<K, i32>,
}

impl<K: Eq + Hash> OutcomeCodes<K> {
    /// An empty mapping: every error passes through.
    pub fn new() -> Self {
        Self {
            codes: HashMap::new(),
        }
    }

    /// Assign `code` to `kind`, replacing any previous code.
    pub fn with(mut self, kind: K, code: i32) -> Self {
        self.codes.insert(kind, code);
        self
    }

    /// The code assigned to `kind`, if any.
    pub fn code(&self, kind: &K) -> Option<i32> {
        self.codes.get(kind).copied()
    }
}

impl<K: Eq + Hash> Default for OutcomeCodes<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> FromIterator<(K, i32)> for OutcomeCodes<K> {
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash, const N: usize> From<[(K, i32); N]> for OutcomeCodes<K> {
    fn from(pairs: [(K, i32); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Run `operation` and translate its outcome into a code.
///
/// - `Ok(())` becomes [`SUCCESS`].
/// - An error whose kind has a code is logged and becomes that code.
/// - Any other error is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use retriable::outcome::{OutcomeCodes, catch_errors};
/// use std::io;
///
/// let codes = OutcomeCodes::from([(io::ErrorKind::NotFound, 2)]);
///
/// let code = catch_errors(&codes, || {
///     Err(io::Error::new(io::ErrorKind::NotFound, "config.toml"))
/// });
/// assert_eq!(code.unwrap(), 2);
/// ```
pub fn catch_errors<E, F>(codes: &OutcomeCodes<E::Kind>, operation: F) -> Result<i32, E>
where
    F: FnOnce() -> Result<(), E>,
    E: Classify + fmt::Display,
{
    match operation() {
        Ok(()) => Ok(SUCCESS),
        Err(err) => {
            let kind = err.kind();
            match codes.code(&kind) {
                Some(code) => {
                    tracing::warn!("{}", caught_message(&kind, &err));
                    Ok(code)
                }
                None => Err(err),
            }
        }
    }
}

fn caught_message(kind: &impl fmt::Debug, err: &impl fmt::Display) -> String {
    format!("[Catch error] {:?} ({}).", kind, or_dash(&err.to_string()))
}
