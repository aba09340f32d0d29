//! Parsing of `key1=value1, key2=value2` option strings.

use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while parsing a key/value list
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A comma-separated entry did not split into exactly one key and one value
    #[error("invalid pair {pair:?}: expected exactly one '=' separating key and value")]
    InvalidPair {
        /// The offending entry, after trimming
        pair: String,
    },
}

/// Parse `"key1=value1, key2=value2"` into a map.
///
/// Returns `Ok(None)` for an empty string. Entries are split on `,` and
/// trimmed; each must contain exactly one `=`. Whitespace around the `=` is
/// kept as part of the key and value. A repeated key keeps its last value.
///
/// # Examples
///
/// ```rust
/// use retriable::parse::parse_key_values;
///
/// let map = parse_key_values("retries=3, mode=fast").unwrap().unwrap();
/// assert_eq!(map["retries"], "3");
/// assert_eq!(map["mode"], "fast");
///
/// assert_eq!(parse_key_values("").unwrap(), None);
/// ```
pub fn parse_key_values(input: &str) -> Result<Option<HashMap<String, String>>, ParseError> {
    if input.is_empty() {
        return Ok(None);
    }

    input
        .split(',')
        .map(str::trim)
        .map(|pair| {
            let mut parts = pair.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => Ok((key.to_string(), value.to_string())),
                _ => Err(ParseError::InvalidPair {
                    pair: pair.to_string(),
                }),
            }
        })
        .collect::<Result<HashMap<_, _>, _>>()
        .map(Some)
}
