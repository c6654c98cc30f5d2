//! File-backed counter storage.
//!
//! The counter is stored as a newline-terminated decimal, e.g. `3\n`, in a
//! single file at the root of the working directory.

use crate::{
    format_counter, parse_counter, CounterStore, StorageError, StorageResult, INITIAL_VERSION,
};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Counter stored in a plain text file.
#[derive(Debug, Clone)]
pub struct FileCounterStore {
    path: PathBuf,
}

impl FileCounterStore {
    /// Create a store backed by the file at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the counter file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn map_open_error(&self, err: std::io::Error) -> StorageError {
        if err.kind() == ErrorKind::NotFound {
            StorageError::not_initialized(self.location())
        } else {
            StorageError::Io(err)
        }
    }
}

#[async_trait]
impl CounterStore for FileCounterStore {
    async fn initialize(&self) -> StorageResult<bool> {
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %self.path.display(), "Counter already exists");
                return Ok(false);
            }
            Err(e) => return Err(StorageError::Io(e)),
        };

        file.write_all(format_counter(INITIAL_VERSION).as_bytes()).await?;
        file.flush().await?;

        debug!(path = %self.path.display(), "Created counter");
        Ok(true)
    }

    async fn read(&self) -> StorageResult<u64> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.map_open_error(e))?;
        parse_counter(&content, &self.location())
    }

    async fn write(&self, value: u64) -> StorageResult<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .await
            .map_err(|e| self.map_open_error(e))?;

        file.write_all(format_counter(value).as_bytes()).await?;
        file.flush().await?;

        debug!(path = %self.path.display(), value, "Wrote counter");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
