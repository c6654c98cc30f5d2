//! Git front-end.
//!
//! All version-control work is delegated to the external git program through
//! a [`CommandRunner`]. Output is never captured; the user sees git's own
//! messages.

use crate::error::{LvcError, LvcResult};
use lvc_util::{CommandRunner, Invocation};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Runs git subcommands inside snapshot folders.
#[derive(Clone)]
pub struct Git {
    runner: Arc<dyn CommandRunner>,
    program: String,
}

impl Git {
    /// Create a front-end that launches `program` through `runner`.
    pub fn new(runner: Arc<dyn CommandRunner>, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// The program name used for every invocation.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// `git init` in `dir`.
    pub async fn init(&self, dir: &Path) -> LvcResult<()> {
        self.run(["init"], dir).await
    }

    /// `git add -A` in `dir`.
    pub async fn stage_all(&self, dir: &Path) -> LvcResult<()> {
        self.run(["add", "-A"], dir).await
    }

    /// Run an arbitrary single-word subcommand, e.g. `git status`, in `dir`.
    pub async fn forward(&self, subcommand: &str, dir: &Path) -> LvcResult<()> {
        self.run([subcommand], dir).await
    }

    async fn run<const N: usize>(&self, args: [&str; N], dir: &Path) -> LvcResult<()> {
        let invocation = Invocation::new(&self.program)
            .args(args)
            .current_dir(dir);

        let outcome = self
            .runner
            .run(&invocation)
            .await
            .map_err(|e| LvcError::external(invocation.to_string(), e.to_string()))?;

        if !outcome.success() {
            return Err(LvcError::external(invocation.to_string(), outcome.to_string()));
        }

        info!(command = %invocation, dir = %dir.display(), "git finished");
        Ok(())
    }
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git").field("program", &self.program).finish()
    }
}
