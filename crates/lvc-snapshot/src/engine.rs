//! Snapshot engine.
//!
//! A snapshot is a plain copy of the working tree:
//! ```text
//! root/
//!   lvc.db                 # counter, never copied
//!   src/...
//!   Version 1/             # previous snapshots, never copied
//!   Version 2/
//!     src/...              # copy of the tree at `lvc create` time
//! ```

use crate::config::LvcConfig;
use crate::error::{LvcError, LvcResult};
use crate::label::{folder_path, VersionLabel};
use lvc_storage::CounterStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// What a successful snapshot produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotReport {
    /// Number of the snapshot that was created.
    pub version: u64,
    /// Folder holding the copy.
    pub folder: PathBuf,
    /// Regular files copied.
    pub files: usize,
    /// Directories created below the snapshot folder.
    pub dirs: usize,
    /// Symbolic links recreated.
    pub links: usize,
    /// Special files (FIFOs, sockets, devices) left out.
    pub skipped: usize,
}

/// Copies the working tree into numbered snapshot folders.
pub struct SnapshotEngine {
    root: PathBuf,
    folder_prefix: String,
    counter_file: String,
    store: Arc<dyn CounterStore>,
}

impl SnapshotEngine {
    /// Create an engine snapshotting `root`, with the counter held by `store`.
    pub fn new(
        root: impl Into<PathBuf>,
        config: &LvcConfig,
        store: Arc<dyn CounterStore>,
    ) -> Self {
        Self {
            root: root.into(),
            folder_prefix: config.folder_prefix.clone(),
            counter_file: config.counter_file.clone(),
            store,
        }
    }

    /// Snapshot the working tree into the folder named by the current counter,
    /// then advance the counter.
    ///
    /// The counter is only written after the whole tree was copied; a failed
    /// copy leaves a partial folder behind and the counter untouched.
    pub async fn create_snapshot(&self) -> LvcResult<SnapshotReport> {
        let version = self.store.read().await?;
        let next = version.checked_add(1).ok_or_else(|| LvcError::InvalidCounter {
            location: self.store.location(),
            reason: "counter cannot be advanced past its maximum".to_string(),
        })?;

        let label = VersionLabel::number(version);
        let folder = folder_path(&self.root, &self.folder_prefix, &label);
        match fs::create_dir(&folder).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(folder = %folder.display(), "Snapshot folder already exists");
            }
            Err(e) => return Err(LvcError::io_at(&folder, e)),
        }

        let mut report = SnapshotReport {
            version,
            folder,
            files: 0,
            dirs: 0,
            links: 0,
            skipped: 0,
        };
        self.copy_tree(&mut report).await?;

        self.store.write(next).await?;

        info!(
            version,
            files = report.files,
            dirs = report.dirs,
            links = report.links,
            "Created snapshot {}",
            report.folder.display()
        );
        Ok(report)
    }

    /// Whether a walked entry is left out of snapshots.
    ///
    /// Excluded directories are not descended into.
    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        if entry.depth() == 1 && name == self.counter_file.as_str() {
            return true;
        }
        name.starts_with(&self.folder_prefix)
    }

    async fn copy_tree(&self, report: &mut SnapshotReport) -> LvcResult<()> {
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e));

        for entry in walker {
            let entry = entry.map_err(walk_error)?;
            if entry.depth() == 0 {
                continue;
            }

            let relative = entry.path().strip_prefix(&self.root).map_err(|_| {
                LvcError::io_at(
                    entry.path(),
                    std::io::Error::other("entry is outside the working directory"),
                )
            })?;
            let target = report.folder.join(relative);
            let file_type = entry.file_type();

            if file_type.is_dir() {
                fs::create_dir_all(&target)
                    .await
                    .map_err(|e| LvcError::io_at(&target, e))?;
                report.dirs += 1;
            } else if file_type.is_symlink() {
                copy_symlink(entry.path(), &target).await?;
                report.links += 1;
            } else if file_type.is_file() {
                fs::copy(entry.path(), &target)
                    .await
                    .map_err(|e| LvcError::io_at(entry.path(), e))?;
                report.files += 1;
            } else {
                // Reading a FIFO or device would block or never end.
                warn!(path = %relative.display(), "Skipping special file");
                report.skipped += 1;
                continue;
            }

            debug!(path = %relative.display(), "Copied");
        }

        Ok(())
    }
}

fn walk_error(err: walkdir::Error) -> LvcError {
    let path = err.path().map(Path::to_path_buf);
    let io = std::io::Error::from(err);
    match path {
        Some(path) => LvcError::io_at(path, io),
        None => LvcError::Io(io),
    }
}

/// Recreate a symbolic link with the same target.
#[cfg(unix)]
async fn copy_symlink(src: &Path, dst: &Path) -> LvcResult<()> {
    let link_target = fs::read_link(src)
        .await
        .map_err(|e| LvcError::io_at(src, e))?;

    // Snapshot folders may be re-filled after an aborted create.
    match fs::remove_file(dst).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(LvcError::io_at(dst, e)),
    }

    fs::symlink(&link_target, dst)
        .await
        .map_err(|e| LvcError::io_at(dst, e))
}

/// Copy the link target's contents; links cannot be recreated portably here.
#[cfg(not(unix))]
async fn copy_symlink(src: &Path, dst: &Path) -> LvcResult<()> {
    fs::copy(src, dst)
        .await
        .map(|_| ())
        .map_err(|e| LvcError::io_at(src, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvc_storage::MemoryCounterStore;
    use tempfile::TempDir;

    fn engine(dir: &TempDir, store: Arc<MemoryCounterStore>) -> SnapshotEngine {
        SnapshotEngine::new(dir.path(), &LvcConfig::default(), store)
    }

    #[tokio::test]
    async fn test_uninitialized_store_creates_nothing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        let engine = engine(&dir, Arc::new(MemoryCounterStore::new()));

        let err = engine.create_snapshot().await.unwrap_err();
        assert!(matches!(err, LvcError::NotInitialized(_)));
        assert!(!dir.path().join("Version 1").exists());
    }

    #[tokio::test]
    async fn test_counter_overflow_is_rejected_before_copy() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(MemoryCounterStore::with_value(u64::MAX));
        let engine = engine(&dir, store.clone());

        let err = engine.create_snapshot().await.unwrap_err();
        assert!(matches!(err, LvcError::InvalidCounter { .. }));
        assert_eq!(store.value(), Some(u64::MAX));
    }

    #[tokio::test]
    async fn test_prefixed_entries_skipped_at_any_depth() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("docs/Versioning")).unwrap();
        std::fs::write(dir.path().join("docs/Versioning/notes.md"), "x").unwrap();
        std::fs::write(dir.path().join("docs/guide.md"), "y").unwrap();
        let engine = engine(&dir, Arc::new(MemoryCounterStore::with_value(1)));

        let report = engine.create_snapshot().await.unwrap();
        assert!(report.folder.join("docs/guide.md").exists());
        assert!(!report.folder.join("docs/Versioning").exists());
    }

    #[tokio::test]
    async fn test_nested_counter_name_is_copied() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/lvc.db"), "not the counter").unwrap();
        let engine = engine(&dir, Arc::new(MemoryCounterStore::with_value(1)));

        let report = engine.create_snapshot().await.unwrap();
        assert!(report.folder.join("sub/lvc.db").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinks_are_recreated() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("real.txt"), "data").unwrap();
        std::os::unix::fs::symlink("real.txt", dir.path().join("link.txt")).unwrap();
        let engine = engine(&dir, Arc::new(MemoryCounterStore::with_value(1)));

        let report = engine.create_snapshot().await.unwrap();
        assert_eq!(report.links, 1);
        let copied = report.folder.join("link.txt");
        assert_eq!(std::fs::read_link(&copied).unwrap(), PathBuf::from("real.txt"));
        assert_eq!(std::fs::read_to_string(&copied).unwrap(), "data");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fifo_is_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        let status = std::process::Command::new("mkfifo")
            .arg(dir.path().join("pipe"))
            .status()
            .unwrap();
        assert!(status.success());
        let store = Arc::new(MemoryCounterStore::with_value(1));
        let engine = engine(&dir, store.clone());

        let report = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            engine.create_snapshot(),
        )
        .await
        .expect("snapshot blocked on a FIFO")
        .unwrap();

        assert_eq!(report.files, 1);
        assert_eq!(report.skipped, 1);
        assert!(!report.folder.join("pipe").exists());
        assert_eq!(store.value(), Some(2));
    }
}
