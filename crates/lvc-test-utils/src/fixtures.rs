//! Test fixtures for creating reproducible working directories.
//!
//! Provides a builder for temporary project trees that lvc commands can run
//! against, including a ready-made counter file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary working directory with a configurable file structure.
///
/// The directory is removed when the built project is dropped.
///
/// # Example
///
/// ```rust
/// use lvc_test_utils::fixtures::TestProject;
///
/// let project = TestProject::new()
///     .with_file("src/main.rs", "fn main() {}")
///     .with_dir("assets")
///     .with_counter(1)
///     .build();
///
/// assert!(project.path().join("src/main.rs").exists());
/// assert_eq!(project.read_file("lvc.db"), "1\n");
/// ```
pub struct TestProject {
    /// The temporary directory backing this project.
    temp_dir: TempDir,
    /// Files to create (path relative to root -> contents).
    files: BTreeMap<PathBuf, String>,
    /// Directories to create (paths relative to root).
    dirs: Vec<PathBuf>,
}

impl TestProject {
    /// Create a new test project builder.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            files: BTreeMap::new(),
            dirs: Vec::new(),
        }
    }

    /// Add a file to the project.
    ///
    /// The path is relative to the project root; parent directories are
    /// created automatically.
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.files
            .insert(path.as_ref().to_path_buf(), contents.into());
        self
    }

    /// Add an empty directory to the project.
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.dirs.push(path.as_ref().to_path_buf());
        self
    }

    /// Add a counter file (`lvc.db`) holding `value`.
    pub fn with_counter(self, value: u64) -> Self {
        self.with_file("lvc.db", format!("{}\n", value))
    }

    /// Add a small multi-directory source tree.
    pub fn with_sample_tree(self) -> Self {
        self.with_file("README.md", content::README)
            .with_file("src/main.rs", content::RUST_MAIN)
            .with_file("src/lib/util.rs", content::RUST_UTIL)
            .with_dir("assets/empty")
    }

    /// Build the project, creating all files and directories.
    pub fn build(self) -> BuiltTestProject {
        let root = self.temp_dir.path();

        for dir in &self.dirs {
            let full_path = root.join(dir);
            fs::create_dir_all(&full_path).unwrap_or_else(|e| {
                panic!("Failed to create directory {}: {}", full_path.display(), e)
            });
        }

        for (path, contents) in &self.files {
            let full_path = root.join(path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).unwrap_or_else(|e| {
                    panic!(
                        "Failed to create parent directory for {}: {}",
                        full_path.display(),
                        e
                    )
                });
            }
            fs::write(&full_path, contents)
                .unwrap_or_else(|e| panic!("Failed to write file {}: {}", full_path.display(), e));
        }

        BuiltTestProject {
            temp_dir: self.temp_dir,
        }
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// A built test project with files created on disk.
pub struct BuiltTestProject {
    temp_dir: TempDir,
}

impl BuiltTestProject {
    /// Get the path to the project root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Read a file from the project.
    pub fn read_file(&self, path: impl AsRef<Path>) -> String {
        let full_path = self.path().join(path.as_ref());
        fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", full_path.display(), e))
    }

    /// Check if a file or directory exists in the project.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.path().join(path.as_ref()).exists()
    }

    /// Write a file to the project (for modifying during tests).
    pub fn write_file(&self, path: impl AsRef<Path>, contents: impl AsRef<str>) {
        let full_path = self.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(&full_path, contents.as_ref())
            .unwrap_or_else(|e| panic!("Failed to write file {}: {}", full_path.display(), e));
    }

    /// Path of the snapshot folder `Version <label>`.
    pub fn version_dir(&self, label: impl std::fmt::Display) -> PathBuf {
        self.path().join(format!("Version {}", label))
    }

    /// Names of all top-level `Version *` folders, sorted.
    pub fn version_dirs(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", self.path().display(), e))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("Version "))
            .collect();
        names.sort();
        names
    }
}

/// Common test file contents.
pub mod content {
    pub const README: &str = "# Sample project\n";

    pub const RUST_MAIN: &str = r#"fn main() {
    println!("Hello, world!");
}
"#;

    pub const RUST_UTIL: &str = r#"pub fn add(a: i32, b: i32) -> i32 {
    a + b
}
"#;
}
