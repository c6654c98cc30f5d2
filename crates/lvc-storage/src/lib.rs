//! Version counter storage for lvc.
//!
//! The counter is the only persistent state lvc owns: a single non-negative
//! integer naming the *next* snapshot to create. The most recent snapshot is
//! therefore always `counter - 1`.
//!
//! Two backends are provided:
//! - File storage (default), a newline-terminated decimal in one file
//! - In-memory storage (for testing)

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileCounterStore;
pub use memory::MemoryCounterStore;

use async_trait::async_trait;

/// Value written by [`CounterStore::initialize`].
pub const INITIAL_VERSION: u64 = 1;

/// A trait for version counter backends.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Create the counter with value [`INITIAL_VERSION`] if it does not exist.
    ///
    /// Returns `true` when the counter was created, `false` when it already
    /// existed (in which case nothing is touched).
    async fn initialize(&self) -> StorageResult<bool>;

    /// Read the current counter value.
    ///
    /// Fails with [`StorageError::NotInitialized`] when the counter is absent.
    async fn read(&self) -> StorageResult<u64>;

    /// Overwrite the counter value.
    ///
    /// Fails with [`StorageError::NotInitialized`] when the counter is absent;
    /// writing never creates it.
    async fn write(&self, value: u64) -> StorageResult<()>;

    /// Describe where the counter lives, for messages and logs.
    fn location(&self) -> String;
}

/// Parse the textual counter representation.
///
/// Only the first line counts; surrounding whitespace is ignored.
pub fn parse_counter(content: &str, location: &str) -> StorageResult<u64> {
    let line = content
        .lines()
        .next()
        .ok_or_else(|| StorageError::invalid_counter(location, "file is empty"))?;

    let trimmed = line.trim();
    trimmed.parse::<u64>().map_err(|e| {
        StorageError::invalid_counter(
            location,
            format!("{:?} is not a counter value: {}", trimmed, e),
        )
    })
}

/// Render a counter value the way it is persisted.
pub fn format_counter(value: u64) -> String {
    format!("{}\n", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_counter_reads_first_line() {
        assert_eq!(parse_counter("7\n", "lvc.db").unwrap(), 7);
        assert_eq!(parse_counter("  12  \nignored\n", "lvc.db").unwrap(), 12);
        assert_eq!(parse_counter("3", "lvc.db").unwrap(), 3);
    }

    #[test]
    fn parse_counter_rejects_empty() {
        let err = parse_counter("", "lvc.db").unwrap_err();
        assert!(matches!(err, StorageError::InvalidCounter { .. }));
    }

    #[test]
    fn parse_counter_rejects_garbage_and_negatives() {
        assert!(parse_counter("abc\n", "lvc.db").is_err());
        assert!(parse_counter("-1\n", "lvc.db").is_err());
        assert!(parse_counter("\n5\n", "lvc.db").is_err());
    }

    #[test]
    fn format_counter_appends_newline() {
        assert_eq!(format_counter(1), "1\n");
        assert_eq!(format_counter(42), "42\n");
    }
}
