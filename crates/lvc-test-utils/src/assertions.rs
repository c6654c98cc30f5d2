//! Assertion helpers for snapshot folders and counter files.
//!
//! Failures panic with the full listing of what differed, which is more
//! useful than a bare `assert_eq!` on two directory trees.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Assert that the counter file at `path` holds `expected`.
///
/// # Example
///
/// ```rust
/// use lvc_test_utils::assertions::assert_counter;
/// use tempfile::TempDir;
///
/// let dir = TempDir::new().unwrap();
/// let path = dir.path().join("lvc.db");
/// std::fs::write(&path, "2\n").unwrap();
///
/// assert_counter(&path, 2);
/// ```
pub fn assert_counter(path: &Path, expected: u64) {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read counter {}: {}", path.display(), e));
    let actual: u64 = content
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .parse()
        .unwrap_or_else(|e| panic!("Counter {} is not a number ({}): {:?}", path.display(), e, content));

    assert_eq!(
        actual,
        expected,
        "Counter {} holds {} but {} was expected",
        path.display(),
        actual,
        expected
    );
}

/// All paths below `root`, relative to it, without following links.
pub fn relative_paths(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            let entry =
                entry.unwrap_or_else(|e| panic!("Failed to walk {}: {}", root.display(), e));
            entry
                .path()
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|e| panic!("Entry outside {}: {}", root.display(), e))
        })
        .collect()
}

/// Assert that `snapshot` contains exactly `expected` (relative paths).
pub fn assert_tree_eq<I, P>(snapshot: &Path, expected: I)
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let expected: BTreeSet<PathBuf> = expected
        .into_iter()
        .map(|p| p.as_ref().to_path_buf())
        .collect();
    let actual = relative_paths(snapshot);

    let missing: Vec<_> = expected.difference(&actual).collect();
    let extra: Vec<_> = actual.difference(&expected).collect();
    assert!(
        missing.is_empty() && extra.is_empty(),
        "Tree {} does not match.\nMissing: {:?}\nUnexpected: {:?}",
        snapshot.display(),
        missing,
        extra
    );
}

/// Assert that every regular file in `snapshot` has the same bytes as the
/// file at the same relative path in `source`.
pub fn assert_copied_from(snapshot: &Path, source: &Path) {
    for relative in relative_paths(snapshot) {
        let copy = snapshot.join(&relative);
        if !copy.is_file() || copy.is_symlink() {
            continue;
        }
        let original = source.join(&relative);
        let left = std::fs::read(&copy)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", copy.display(), e));
        let right = std::fs::read(&original)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", original.display(), e));
        assert!(
            left == right,
            "{} differs from {}",
            copy.display(),
            original.display()
        );
    }
}

/// Assert that no path in `snapshot` has a component starting with `prefix`.
pub fn assert_no_component_starts_with(snapshot: &Path, prefix: &str) {
    for relative in relative_paths(snapshot) {
        let offending = relative
            .components()
            .any(|c| c.as_os_str().to_string_lossy().starts_with(prefix));
        assert!(
            !offending,
            "{} contains an entry starting with {:?}: {}",
            snapshot.display(),
            prefix,
            relative.display()
        );
    }
}
