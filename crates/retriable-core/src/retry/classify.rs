//! Error classification.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::io;

/// An error that can report which kind of failure it represents.
///
/// The executor never inspects an error beyond its kind and its `Display`
/// text. The kind decides whether a retry happens; its `Debug` rendering names
/// the failure in log lines.
///
/// # Examples
///
/// ```rust
/// use retriable_core::retry::Classify;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum FetchErrorKind {
///     Transient,
///     Fatal,
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("{message}")]
/// struct FetchError {
///     kind: FetchErrorKind,
///     message: String,
/// }
///
/// impl Classify for FetchError {
///     type Kind = FetchErrorKind;
///
///     fn kind(&self) -> FetchErrorKind {
///         self.kind
///     }
/// }
/// ```
pub trait Classify {
    /// Identifier shared by all errors of the same kind.
    type Kind: Eq + Hash + fmt::Debug;

    /// The kind of this particular error.
    fn kind(&self) -> Self::Kind;
}

impl Classify for io::Error {
    type Kind = io::ErrorKind;

    fn kind(&self) -> io::ErrorKind {
        io::Error::kind(self)
    }
}

/// The set of error kinds a caller has declared safe to retry.
///
/// The executor only borrows the set, so it stays unchanged for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetriableSet<K: Eq + Hash> {
    kinds: HashSet<K>,
}

impl<K: Eq + Hash> RetriableSet<K> {
    /// An empty set: every error is returned on first sight.
    pub fn new() -> Self {
        Self {
            kinds: HashSet::new(),
        }
    }

    /// Whether errors of `kind` should be retried.
    pub fn contains(&self, kind: &K) -> bool {
        self.kinds.contains(kind)
    }

    /// Number of retriable kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no kind is retriable.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl<K: Eq + Hash> Default for RetriableSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> FromIterator<K> for RetriableSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash, const N: usize> From<[K; N]> for RetriableSet<K> {
    fn from(kinds: [K; N]) -> Self {
        kinds.into_iter().collect()
    }
}
