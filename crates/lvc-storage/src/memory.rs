//! In-memory counter storage for testing.

use crate::{CounterStore, StorageError, StorageResult, INITIAL_VERSION};
use async_trait::async_trait;
use std::sync::RwLock;

/// In-memory counter.
///
/// Behaves like [`FileCounterStore`](crate::FileCounterStore): reads and
/// writes fail until [`CounterStore::initialize`] has run.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    value: RwLock<Option<u64>>,
}

impl MemoryCounterStore {
    /// Create an uninitialized in-memory counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter that is already initialized with `value`.
    pub fn with_value(value: u64) -> Self {
        Self {
            value: RwLock::new(Some(value)),
        }
    }

    /// Peek at the stored value without going through the trait.
    pub fn value(&self) -> Option<u64> {
        self.value.read().ok().and_then(|v| *v)
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn initialize(&self) -> StorageResult<bool> {
        let mut value = self
            .value
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        if value.is_some() {
            return Ok(false);
        }
        *value = Some(INITIAL_VERSION);
        Ok(true)
    }

    async fn read(&self) -> StorageResult<u64> {
        let value = self
            .value
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        value.ok_or_else(|| StorageError::not_initialized(self.location()))
    }

    async fn write(&self, new_value: u64) -> StorageResult<()> {
        let mut value = self
            .value
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        match value.as_mut() {
            Some(slot) => {
                *slot = new_value;
                Ok(())
            }
            None => Err(StorageError::not_initialized(self.location())),
        }
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_initialize_idempotent() {
        let store = MemoryCounterStore::new();
        assert!(store.initialize().await.unwrap());
        assert!(!store.initialize().await.unwrap());
        assert_eq!(store.read().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_memory_requires_initialize() {
        let store = MemoryCounterStore::new();
        assert!(store.read().await.unwrap_err().is_not_initialized());
        assert!(store.write(3).await.unwrap_err().is_not_initialized());
        assert_eq!(store.value(), None);
    }

    #[tokio::test]
    async fn test_memory_write_then_read() {
        let store = MemoryCounterStore::with_value(4);
        store.write(5).await.unwrap();
        assert_eq!(store.read().await.unwrap(), 5);
        assert_eq!(store.value(), Some(5));
    }
}
