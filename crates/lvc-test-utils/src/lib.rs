//! Testing utilities, fixtures, and mocks for lvc.
//!
//! - **Fixtures**: temporary working directories with a prepared file tree
//! - **Mocks**: a command runner that records invocations instead of spawning
//! - **Assertions**: helpers for comparing snapshot folders with their source
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use lvc_test_utils::{RecordingRunner, TestProject};
//!
//! #[tokio::test]
//! async fn test_convert() {
//!     let project = TestProject::new()
//!         .with_file("src/main.rs", "fn main() {}")
//!         .build();
//!     let runner = RecordingRunner::new().with_exit("git add", 1);
//!
//!     // Hand `Arc::new(runner.clone())` to the code under test...
//!     assert!(runner.was_run("git init"));
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mocks;

pub use fixtures::{BuiltTestProject, TestProject};
pub use mocks::{CannedResponse, RecordingRunner};
