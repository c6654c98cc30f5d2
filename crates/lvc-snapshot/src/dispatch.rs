//! Command routing.
//!
//! [`Dispatcher`] owns the injected collaborators (counter store, command
//! runner) and maps each [`Command`] onto the store, the snapshot engine or
//! the converter. Argument presence is checked here rather than by the CLI
//! parser so that a missing label is a [`LvcError::Usage`] like any other.

use crate::config::LvcConfig;
use crate::convert::Converter;
use crate::engine::{SnapshotEngine, SnapshotReport};
use crate::error::{LvcError, LvcResult};
use crate::label::{folder_path, VersionLabel};
use crate::vcs::Git;
use lvc_storage::{CounterStore, FileCounterStore};
use lvc_util::{CommandRunner, SystemRunner};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const CONVERT_USAGE: &str = "lvc convert <label>";
const GIT_USAGE: &str = "lvc git <subcommand> [<label>]";

/// A parsed lvc command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the version counter.
    Init,
    /// Snapshot the working tree.
    Create,
    /// Turn a snapshot folder into a git repository.
    Convert { label: Option<String> },
    /// Run a git subcommand inside a snapshot folder.
    Git {
        subcommand: Option<String>,
        label: Option<String>,
    },
    /// Anything else.
    Unknown(String),
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `init` ran; `created` is false when the counter already existed.
    Initialized { created: bool, location: String },
    /// `create` produced a snapshot.
    Snapshot(SnapshotReport),
    /// `convert` initialized and staged a repository.
    Converted { folder: PathBuf },
    /// `git` forwarded a subcommand.
    Forwarded { subcommand: String, folder: PathBuf },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Initialized {
                created: true,
                location,
            } => write!(f, "Initialized version store at {}", location),
            Outcome::Initialized {
                created: false,
                location,
            } => write!(f, "Version store already initialized at {}", location),
            Outcome::Snapshot(report) => {
                write!(
                    f,
                    "Created {} ({} files, {} directories",
                    display_name(&report.folder),
                    report.files,
                    report.dirs
                )?;
                if report.links > 0 {
                    write!(f, ", {} links", report.links)?;
                }
                if report.skipped > 0 {
                    write!(f, ", {} special files skipped", report.skipped)?;
                }
                write!(f, ")")
            }
            Outcome::Converted { folder } => {
                write!(f, "Converted {} to a git repository", display_name(folder))
            }
            Outcome::Forwarded { subcommand, folder } => {
                write!(f, "Ran 'git {}' in {}", subcommand, display_name(folder))
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Routes commands to the counter store, snapshot engine and converter.
pub struct Dispatcher {
    root: PathBuf,
    folder_prefix: String,
    store: Arc<dyn CounterStore>,
    engine: SnapshotEngine,
    converter: Converter,
    git: Git,
}

impl Dispatcher {
    /// Create a dispatcher with explicit collaborators.
    pub fn new(
        root: impl Into<PathBuf>,
        config: &LvcConfig,
        store: Arc<dyn CounterStore>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let root = root.into();
        let git = Git::new(runner, config.git_program.clone());

        Self {
            engine: SnapshotEngine::new(root.clone(), config, store.clone()),
            converter: Converter::new(root.clone(), config, git.clone()),
            folder_prefix: config.folder_prefix.clone(),
            root,
            store,
            git,
        }
    }

    /// Create a dispatcher using the counter file in `root` and real processes.
    pub fn for_directory(root: impl Into<PathBuf>, config: LvcConfig) -> Self {
        let root = root.into();
        let store = Arc::new(FileCounterStore::new(root.join(&config.counter_file)));
        Self::new(root, &config, store, Arc::new(SystemRunner::new()))
    }

    /// Run one command.
    pub async fn dispatch(&self, command: Command) -> LvcResult<Outcome> {
        debug!(?command, root = %self.root.display(), "Dispatching");

        match command {
            Command::Init => self.init().await,
            Command::Create => self
                .engine
                .create_snapshot()
                .await
                .map(Outcome::Snapshot),
            Command::Convert { label } => self.convert(label).await,
            Command::Git { subcommand, label } => self.forward(subcommand, label).await,
            Command::Unknown(token) => Err(LvcError::UnknownCommand(token)),
        }
    }

    async fn init(&self) -> LvcResult<Outcome> {
        let created = self.store.initialize().await?;
        Ok(Outcome::Initialized {
            created,
            location: self.store.location(),
        })
    }

    async fn convert(&self, label: Option<String>) -> LvcResult<Outcome> {
        let label = label.ok_or_else(|| LvcError::usage(CONVERT_USAGE))?;
        let label = VersionLabel::parse(label)?;

        let folder = self.converter.convert(&label).await?;
        Ok(Outcome::Converted { folder })
    }

    async fn forward(
        &self,
        subcommand: Option<String>,
        label: Option<String>,
    ) -> LvcResult<Outcome> {
        let subcommand = subcommand
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| LvcError::usage(GIT_USAGE))?;

        let label = match label {
            Some(label) => VersionLabel::parse(label)?,
            None => self.latest_label().await?,
        };
        let folder = folder_path(&self.root, &self.folder_prefix, &label);

        self.git.forward(&subcommand, &folder).await?;
        Ok(Outcome::Forwarded { subcommand, folder })
    }

    /// Label of the most recent snapshot: one less than the counter.
    async fn latest_label(&self) -> LvcResult<VersionLabel> {
        let next = self.store.read().await?;
        match next.checked_sub(1) {
            Some(latest) if latest >= 1 => Ok(VersionLabel::number(latest)),
            _ => Err(LvcError::NoSnapshots),
        }
    }
}
