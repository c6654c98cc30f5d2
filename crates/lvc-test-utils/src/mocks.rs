//! Mock implementations for testing.
//!
//! [`RecordingRunner`] stands in for [`lvc_util::SystemRunner`]: it records
//! every invocation and answers with canned exit codes.

use async_trait::async_trait;
use lvc_util::{CommandRunner, Error, ExitOutcome, Invocation};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A canned reply to an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CannedResponse {
    /// The program ran and exited with this code.
    Exit(i32),
    /// The program could not be started.
    LaunchFailure(String),
}

/// A command runner that records invocations instead of spawning processes.
///
/// Responses are matched against the invocation's command line (program and
/// arguments, without the working directory): exact match first, then the
/// longest prefix match. Unmatched invocations succeed.
///
/// # Example
///
/// ```rust
/// use lvc_test_utils::mocks::RecordingRunner;
/// use lvc_util::{CommandRunner, Invocation};
///
/// # let rt = tokio::runtime::Runtime::new().unwrap();
/// # rt.block_on(async {
/// let runner = RecordingRunner::new().with_exit("git add", 1);
///
/// let ok = runner.run(&Invocation::new("git").arg("init")).await.unwrap();
/// let failed = runner.run(&Invocation::new("git").args(["add", "-A"])).await.unwrap();
///
/// assert!(ok.success());
/// assert_eq!(failed.code(), Some(1));
/// assert_eq!(runner.invocation_count(), 2);
/// # });
/// ```
#[derive(Clone, Default)]
pub struct RecordingRunner {
    /// Recorded invocations, in order.
    invocations: Arc<Mutex<Vec<Invocation>>>,
    /// Configured responses (command line -> response).
    responses: Arc<Mutex<HashMap<String, CannedResponse>>>,
}

impl RecordingRunner {
    /// Create a runner where every invocation succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `command` (or any command line starting with it) with `code`.
    pub fn with_exit(self, command: &str, code: i32) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(command.to_string(), CannedResponse::Exit(code));
        self
    }

    /// Make `command` fail to launch.
    pub fn with_launch_failure(self, command: &str, message: &str) -> Self {
        self.responses.lock().unwrap().insert(
            command.to_string(),
            CannedResponse::LaunchFailure(message.to_string()),
        );
        self
    }

    /// Get all recorded invocations.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// Get the number of invocations.
    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    /// Command lines of all recorded invocations, e.g. `git add -A`.
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Check if a command line containing `command` was run.
    pub fn was_run(&self, command: &str) -> bool {
        self.command_lines().iter().any(|c| c.contains(command))
    }

    /// Get the last invocation.
    pub fn last_invocation(&self) -> Option<Invocation> {
        self.invocations.lock().unwrap().last().cloned()
    }

    fn response_for(&self, command_line: &str) -> Option<CannedResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(command_line) {
            return Some(response.clone());
        }

        // Longest prefix wins so "git add -A" can override "git".
        let prefix_match = responses
            .iter()
            .filter(|(cmd, _)| command_line.starts_with(cmd.as_str()))
            .max_by_key(|(cmd, _)| cmd.len())
            .map(|(_, response)| response.clone());
        prefix_match
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> lvc_util::Result<ExitOutcome> {
        self.invocations.lock().unwrap().push(invocation.clone());

        match self.response_for(&invocation.to_string()) {
            Some(CannedResponse::Exit(code)) => Ok(ExitOutcome::from_code(code)),
            Some(CannedResponse::LaunchFailure(message)) => Err(Error::launch(
                &invocation.program,
                std::io::Error::new(std::io::ErrorKind::NotFound, message),
            )),
            None => Ok(ExitOutcome::ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvc_util::ErrorKind;

    #[tokio::test]
    async fn test_records_invocations_with_cwd() {
        let runner = RecordingRunner::new();
        runner
            .run(&Invocation::new("git").arg("status").current_dir("Version 2"))
            .await
            .unwrap();

        let last = runner.last_invocation().unwrap();
        assert_eq!(last.to_string(), "git status");
        assert_eq!(last.cwd(), Some(std::path::Path::new("Version 2")));
        assert!(runner.was_run("status"));
    }

    #[tokio::test]
    async fn test_exact_and_prefix_responses() {
        let runner = RecordingRunner::new()
            .with_exit("git", 1)
            .with_exit("git init", 0);

        let init = runner.run(&Invocation::new("git").arg("init")).await.unwrap();
        let add = runner
            .run(&Invocation::new("git").args(["add", "-A"]))
            .await
            .unwrap();

        assert!(init.success());
        assert_eq!(add.code(), Some(1));
    }

    #[tokio::test]
    async fn test_launch_failure() {
        let runner = RecordingRunner::new().with_launch_failure("git", "not installed");
        let err = runner
            .run(&Invocation::new("git").arg("init"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Launch);
        assert_eq!(runner.invocation_count(), 1);
    }
}
