//! Error types for lvc operations.

use lvc_storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for lvc operations.
pub type LvcResult<T> = Result<T, LvcError>;

/// Errors that can occur while running an lvc command.
#[derive(Debug, Error)]
pub enum LvcError {
    /// A required argument is missing.
    #[error("usage: {0}")]
    Usage(String),

    /// The version counter does not exist yet.
    #[error("version store not initialized ({0}); please run 'lvc init' first")]
    NotInitialized(String),

    /// No snapshot has been created, so there is no latest one to target.
    #[error("no snapshots yet; run 'lvc create' first")]
    NoSnapshots,

    /// A version label that would not name a folder in the working directory.
    #[error("invalid version label {label:?}: {reason}")]
    InvalidLabel { label: String, reason: String },

    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Filesystem failure on a known path.
    #[error("IO error at {}: {source}", path.display())]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The counter file holds something other than a counter.
    #[error("invalid counter in {location}: {reason}")]
    InvalidCounter { location: String, reason: String },

    /// Invalid configuration file or value.
    #[error("invalid config at {path}: {message}")]
    Config { path: String, message: String },

    /// The external version-control tool failed or could not be started.
    #[error("'{command}' failed: {reason}")]
    ExternalTool { command: String, reason: String },

    /// The command token is not one lvc knows.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

impl LvcError {
    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Create an invalid label error.
    pub fn invalid_label(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLabel {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Create an IO error tied to a path.
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoAt {
            path: path.into(),
            source,
        }
    }

    /// Create an external tool error.
    pub fn external(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ExternalTool {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Process exit code for this error.
    ///
    /// | code | meaning |
    /// |------|---------|
    /// | 2 | usage or invalid label |
    /// | 3 | store not initialized or no snapshots |
    /// | 4 | filesystem, counter or config failure |
    /// | 5 | external tool failure |
    /// | 6 | unknown command |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::InvalidLabel { .. } => 2,
            Self::NotInitialized(_) | Self::NoSnapshots => 3,
            Self::Io(_) | Self::IoAt { .. } | Self::InvalidCounter { .. } | Self::Config { .. } => 4,
            Self::ExternalTool { .. } => 5,
            Self::UnknownCommand(_) => 6,
        }
    }
}

impl From<StorageError> for LvcError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => Self::Io(e),
            StorageError::NotInitialized(location) => Self::NotInitialized(location),
            StorageError::InvalidCounter { location, reason } => {
                Self::InvalidCounter { location, reason }
            }
            StorageError::LockPoisoned(message) => Self::Io(std::io::Error::other(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_initialized_mentions_init() {
        let err = LvcError::NotInitialized("lvc.db".to_string());
        assert!(err.to_string().contains("lvc init"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(LvcError::usage("lvc convert <label>").exit_code(), 2);
        assert_eq!(LvcError::invalid_label("../x", "escapes").exit_code(), 2);
        assert_eq!(LvcError::NoSnapshots.exit_code(), 3);
        assert_eq!(LvcError::Io(io).exit_code(), 4);
        assert_eq!(LvcError::external("git init", "exit status 1").exit_code(), 5);
        assert_eq!(LvcError::UnknownCommand("frobnicate".into()).exit_code(), 6);
    }

    #[test]
    fn test_from_storage_error() {
        let err: LvcError = StorageError::not_initialized("lvc.db").into();
        assert!(matches!(err, LvcError::NotInitialized(_)));

        let err: LvcError = StorageError::invalid_counter("lvc.db", "file is empty").into();
        assert!(matches!(err, LvcError::InvalidCounter { .. }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_io_at_displays_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LvcError::io_at("Version 1/src", io);
        assert_eq!(err.to_string(), "IO error at Version 1/src: denied");
    }

    #[test]
    fn test_external_tool_display() {
        let err = LvcError::external("git init", "exit status 128");
        assert_eq!(err.to_string(), "'git init' failed: exit status 128");
    }
}
