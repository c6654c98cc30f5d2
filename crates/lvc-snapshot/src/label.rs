//! Version labels and snapshot folder naming.

use crate::error::{LvcError, LvcResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// The label part of a snapshot folder name (`Version <label>`).
///
/// Snapshots created by lvc use the counter value, but `convert` and `git`
/// accept any label that stays inside the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionLabel(String);

impl VersionLabel {
    /// Validate a caller-supplied label.
    pub fn parse(label: impl Into<String>) -> LvcResult<Self> {
        let label = label.into();

        if label.is_empty() {
            return Err(LvcError::invalid_label(label, "label is empty"));
        }
        if label.contains('/') || label.contains('\\') {
            return Err(LvcError::invalid_label(label, "label contains a path separator"));
        }
        if label == "." || label == ".." {
            return Err(LvcError::invalid_label(label, "label is a relative path"));
        }
        if label.contains('\0') {
            return Err(LvcError::invalid_label(label, "label contains a NUL byte"));
        }

        Ok(Self(label))
    }

    /// Label for a numbered snapshot.
    pub fn number(version: u64) -> Self {
        Self(version.to_string())
    }

    /// Get the label as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Folder name for `label`, e.g. `Version 3`.
pub fn folder_name(prefix: &str, label: &VersionLabel) -> String {
    format!("{} {}", prefix, label)
}

/// Path of the snapshot folder for `label` under `root`.
pub fn folder_path(root: &Path, prefix: &str, label: &VersionLabel) -> PathBuf {
    root.join(folder_name(prefix, label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_label_folder_name() {
        assert_eq!(folder_name("Version", &VersionLabel::number(1)), "Version 1");
        assert_eq!(folder_name("Version", &VersionLabel::number(42)), "Version 42");
    }

    #[test]
    fn test_free_form_labels_allowed() {
        let label = VersionLabel::parse("release candidate").unwrap();
        assert_eq!(folder_name("Version", &label), "Version release candidate");

        let label = VersionLabel::parse("1.2-beta").unwrap();
        assert_eq!(label.as_str(), "1.2-beta");
    }

    #[test]
    fn test_rejects_traversal() {
        for bad in ["", ".", "..", "../etc", "a/b", "a\\b"] {
            let err = VersionLabel::parse(bad).unwrap_err();
            assert!(matches!(err, LvcError::InvalidLabel { .. }), "{bad:?}");
        }
    }

    #[test]
    fn test_folder_path_joins_root() {
        let path = folder_path(Path::new("/work"), "Version", &VersionLabel::number(2));
        assert_eq!(path, PathBuf::from("/work/Version 2"));
    }
}
