//! Lookup of a relative path across several base directories.

use std::path::{Path, PathBuf};

/// The first `prefix.join(relative)` that exists, trying prefixes in order.
///
/// # Examples
///
/// ```rust
/// use retriable::paths::first_existing;
///
/// let tmp = std::env::temp_dir();
/// let found = first_existing([tmp.join("no-such-dir"), tmp.clone()], ".");
/// assert_eq!(found, Some(tmp.join(".")));
/// ```
pub fn first_existing<I, P>(prefixes: I, relative: impl AsRef<Path>) -> Option<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let relative = relative.as_ref();
    prefixes
        .into_iter()
        .map(|prefix| prefix.as_ref().join(relative))
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_returns_first_match_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::create_dir_all(first.path().join("share")).unwrap();
        fs::write(first.path().join("share/app.conf"), "a").unwrap();
        fs::create_dir_all(second.path().join("share")).unwrap();
        fs::write(second.path().join("share/app.conf"), "b").unwrap();

        let found = first_existing([second.path(), first.path()], "share/app.conf");
        assert_eq!(found, Some(second.path().join("share/app.conf")));
    }

    #[test]
    fn test_skips_missing_prefixes() {
        let missing = TempDir::new().unwrap();
        let present = TempDir::new().unwrap();
        fs::write(present.path().join("data.bin"), [0u8; 4]).unwrap();

        let found = first_existing(
            vec![missing.path().to_path_buf(), present.path().to_path_buf()],
            "data.bin",
        );
        assert_eq!(found, Some(present.path().join("data.bin")));
    }

    #[test]
    fn test_none_when_nothing_exists() {
        let dir = TempDir::new().unwrap();
        assert_eq!(first_existing([dir.path()], "nope.txt"), None);
    }

    #[test]
    fn test_empty_prefixes() {
        let prefixes: Vec<PathBuf> = Vec::new();
        assert_eq!(first_existing(prefixes, "anything"), None);
    }
}
