//! Turning snapshot folders into standalone git repositories.

use crate::config::LvcConfig;
use crate::error::LvcResult;
use crate::label::{folder_path, VersionLabel};
use crate::vcs::Git;
use std::path::PathBuf;
use tracing::info;

/// Runs `git init` followed by `git add -A` inside a snapshot folder.
///
/// The folder is not checked beforehand; when it is missing, git cannot be
/// started there and that failure is reported as-is.
#[derive(Debug, Clone)]
pub struct Converter {
    root: PathBuf,
    folder_prefix: String,
    git: Git,
}

impl Converter {
    pub fn new(root: impl Into<PathBuf>, config: &LvcConfig, git: Git) -> Self {
        Self {
            root: root.into(),
            folder_prefix: config.folder_prefix.clone(),
            git,
        }
    }

    /// Convert the snapshot folder for `label`. Returns the folder path.
    pub async fn convert(&self, label: &VersionLabel) -> LvcResult<PathBuf> {
        let folder = folder_path(&self.root, &self.folder_prefix, label);

        self.git.init(&folder).await?;
        self.git.stage_all(&folder).await?;

        info!(folder = %folder.display(), "Converted snapshot to git repository");
        Ok(folder)
    }
}
