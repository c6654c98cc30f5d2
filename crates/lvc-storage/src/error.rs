//! Storage error types.

use thiserror::Error;

/// Result type for counter storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while reading or writing the version counter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error (permission denied, disk full, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The counter has not been created yet.
    #[error("version store not initialized: {0}")]
    NotInitialized(String),

    /// The counter exists but does not hold a single non-negative integer.
    #[error("invalid counter in {location}: {reason}")]
    InvalidCounter { location: String, reason: String },

    /// Lock was poisoned (another thread panicked while holding the lock)
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StorageError {
    /// Create a not initialized error for the given location.
    pub fn not_initialized(location: impl Into<String>) -> Self {
        Self::NotInitialized(location.into())
    }

    /// Create an invalid counter error.
    pub fn invalid_counter(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCounter {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error means the store must be initialized first.
    pub fn is_not_initialized(&self) -> bool {
        matches!(self, Self::NotInitialized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_not_initialized_formats_location() {
        let err = StorageError::not_initialized("lvc.db");
        assert_eq!(err.to_string(), "version store not initialized: lvc.db");
        assert!(err.is_not_initialized());
    }

    #[test]
    fn storage_error_invalid_counter_formats_reason() {
        let err = StorageError::invalid_counter("lvc.db", "file is empty");
        assert_eq!(err.to_string(), "invalid counter in lvc.db: file is empty");
        assert!(!err.is_not_initialized());
    }

    #[test]
    fn storage_error_io_wraps_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StorageError::from(io_err);
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn storage_error_lock_poisoned_displays() {
        let err = StorageError::LockPoisoned("mutex poisoned".to_string());
        assert_eq!(err.to_string(), "Lock poisoned: mutex poisoned");
    }
}
