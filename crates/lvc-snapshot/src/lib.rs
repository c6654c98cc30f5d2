//! Directory snapshots for lvc.
//!
//! This crate holds everything behind the `lvc` commands:
//! - Snapshotting the working tree into numbered `Version N` folders
//! - Converting a snapshot folder into its own git repository
//! - Forwarding git subcommands into snapshot folders
//! - Routing a parsed command to the right operation
//!
//! # Example
//!
//! ```no_run
//! use lvc_snapshot::{Command, Dispatcher, LvcConfig};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let root = PathBuf::from("/project/root");
//! let (config, _) = LvcConfig::load(&root).await?;
//! let dispatcher = Dispatcher::for_directory(root, config);
//!
//! dispatcher.dispatch(Command::Init).await?;
//! let outcome = dispatcher.dispatch(Command::Create).await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

pub mod config;
mod convert;
mod dispatch;
mod engine;
mod error;
mod label;
mod vcs;

pub use config::LvcConfig;
pub use convert::Converter;
pub use dispatch::{Command, Dispatcher, Outcome};
pub use engine::{SnapshotEngine, SnapshotReport};
pub use error::{LvcError, LvcResult};
pub use label::{folder_name, folder_path, VersionLabel};
pub use vcs::Git;
