//! Subprocess execution.
//!
//! Every external tool (git, the package manager, cargo) is reached through
//! [`CommandRunner`], so tests can swap in a recorder instead of spawning real
//! processes. [`SystemRunner`] is the production implementation: the child
//! inherits stdin, stdout and stderr and is awaited to completion.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tracing::debug;

/// A single program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path.
    pub program: String,
    /// Arguments, passed verbatim (no shell expansion).
    pub args: Vec<String>,
    /// Working directory; inherits the parent's when `None`.
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the program inside `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The working directory, if one was set.
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    code: Option<i32>,
}

impl ExitOutcome {
    /// A process that exited with `code`.
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// A process that exited successfully.
    pub fn ok() -> Self {
        Self::from_code(0)
    }

    /// A process killed by a signal (no exit code).
    pub fn signaled() -> Self {
        Self { code: None }
    }

    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// The exit code, if the process exited normally.
    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl From<std::process::ExitStatus> for ExitOutcome {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Capability to run external programs.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `invocation` to completion and report how it ended.
    ///
    /// A non-zero exit is not an error at this level; failing to start the
    /// program is.
    async fn run(&self, invocation: &Invocation) -> Result<ExitOutcome>;
}

/// Runs programs on the host with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ExitOutcome> {
        if invocation.program.is_empty() {
            return Err(Error::invalid_input("program name is empty"));
        }

        debug!(command = %invocation, cwd = ?invocation.cwd, "Running command");

        let mut cmd = tokio::process::Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }

        let status = cmd
            .status()
            .await
            .map_err(|e| Error::launch(&invocation.program, e))?;

        let outcome = ExitOutcome::from(status);
        debug!(command = %invocation, %outcome, "Command finished");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("git").args(["add", "-A"]);
        assert_eq!(inv.to_string(), "git add -A");
        assert!(inv.cwd().is_none());
    }

    #[test]
    fn test_invocation_current_dir() {
        let inv = Invocation::new("git").arg("init").current_dir("Version 1");
        assert_eq!(inv.cwd(), Some(Path::new("Version 1")));
    }

    #[test]
    fn test_exit_outcome() {
        assert!(ExitOutcome::ok().success());
        assert!(!ExitOutcome::from_code(128).success());
        assert!(!ExitOutcome::signaled().success());
        assert_eq!(ExitOutcome::from_code(1).to_string(), "exit status 1");
    }

    #[tokio::test]
    async fn test_empty_program_rejected() {
        let err = SystemRunner::new()
            .run(&Invocation::new(""))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_missing_program_is_launch_error() {
        let err = SystemRunner::new()
            .run(&Invocation::new("lvc-definitely-not-a-real-program"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Launch);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_code_is_reported() {
        let outcome = SystemRunner::new()
            .run(&Invocation::new("sh").args(["-c", "exit 3"]))
            .await
            .unwrap();
        assert_eq!(outcome.code(), Some(3));
        assert!(!outcome.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_in_working_directory() {
        let dir = std::env::temp_dir();
        let outcome = SystemRunner::new()
            .run(&Invocation::new("sh").args(["-c", "test -d ."]).current_dir(&dir))
            .await
            .unwrap();
        assert!(outcome.success());
    }
}
