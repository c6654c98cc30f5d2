//! Shared utilities for lvc.
//!
//! This crate provides the pieces used by both the `lvc` tool and its installer:
//! - Error handling patterns
//! - Logging setup with tracing
//! - Subprocess execution with inherited stdio

pub mod error;
pub mod log;
pub mod process;

pub use error::{Error, ErrorKind, Result};
pub use process::{CommandRunner, ExitOutcome, Invocation, SystemRunner};
