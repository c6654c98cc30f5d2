//! Error types for the installer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for installer steps.
pub type InstallResult<T> = Result<T, InstallError>;

/// Errors that stop the installation.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The installer only runs on Linux.
    #[error("unsupported platform '{0}': this installer only supports Linux")]
    UnsupportedPlatform(String),

    /// None of the supported package managers is on `PATH`.
    #[error("no supported package manager found (looked for apt, dnf, pacman)")]
    NoPackageManager,

    /// An external command could not be started or exited non-zero.
    #[error("'{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// Filesystem failure on a known path.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InstallError {
    /// Create a command failure.
    pub fn command_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create an IO error tied to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
