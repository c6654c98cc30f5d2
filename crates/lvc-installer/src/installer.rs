//! Installation steps.
//!
//! Each step either succeeds or returns an [`InstallError`]; nothing is
//! rolled back. The binary runs the steps in order and stops at the first
//! failure.

use crate::error::{InstallError, InstallResult};
use crate::package::{elevated, PackageManager};
use crate::{BINARY_NAME, DEFAULT_CHECKOUT_DIR, DEFAULT_PREFIX, DEFAULT_REPO_URL};
use lvc_util::{CommandRunner, Invocation};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Installer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Repository to clone.
    pub repo_url: String,
    /// Directory the repository is cloned into.
    pub checkout_dir: PathBuf,
    /// Directory the built binary is installed into.
    pub prefix: PathBuf,
    /// Run privileged commands through `sudo`.
    pub use_sudo: bool,
    /// Skip package manager detection and dependency installation.
    pub skip_deps: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            repo_url: DEFAULT_REPO_URL.to_string(),
            checkout_dir: PathBuf::from(DEFAULT_CHECKOUT_DIR),
            prefix: PathBuf::from(DEFAULT_PREFIX),
            use_sudo: true,
            skip_deps: false,
        }
    }
}

impl InstallOptions {
    /// Where `cargo build --release` leaves the binary.
    pub fn built_binary(&self) -> PathBuf {
        self.checkout_dir
            .join("target")
            .join("release")
            .join(BINARY_NAME)
    }

    /// Final location of the installed binary.
    pub fn installed_binary(&self) -> PathBuf {
        self.prefix.join(BINARY_NAME)
    }
}

/// Fail unless `os` (as in [`std::env::consts::OS`]) is Linux.
pub fn check_platform(os: &str) -> InstallResult<()> {
    if os == "linux" {
        Ok(())
    } else {
        Err(InstallError::UnsupportedPlatform(os.to_string()))
    }
}

/// Runs the provisioning, fetch, build and install steps.
pub struct Installer {
    runner: Arc<dyn CommandRunner>,
    options: InstallOptions,
}

impl Installer {
    pub fn new(runner: Arc<dyn CommandRunner>, options: InstallOptions) -> Self {
        Self { runner, options }
    }

    pub fn options(&self) -> &InstallOptions {
        &self.options
    }

    /// Install git and a Rust toolchain with `manager`.
    pub async fn provision(&self, manager: PackageManager) -> InstallResult<()> {
        if let Some(refresh) = manager.refresh_invocation(self.options.use_sudo) {
            if let Err(e) = self.run(&refresh).await {
                warn!(error = %e, "Package index refresh failed, continuing");
            }
        }

        self.run(&manager.install_invocation(self.options.use_sudo))
            .await?;
        info!(%manager, "Dependencies installed");
        Ok(())
    }

    /// Clone the repository into the checkout directory.
    pub async fn fetch_source(&self) -> InstallResult<()> {
        let clone = Invocation::new("git")
            .arg("clone")
            .arg(&self.options.repo_url)
            .arg(self.options.checkout_dir.to_string_lossy());
        self.run(&clone).await?;
        info!(repo = %self.options.repo_url, "Source fetched");
        Ok(())
    }

    /// Build the release binary inside the checkout.
    pub async fn build(&self) -> InstallResult<()> {
        let build = Invocation::new("cargo")
            .args(["build", "--release", "--bin", BINARY_NAME])
            .current_dir(&self.options.checkout_dir);
        self.run(&build).await?;
        info!(binary = %self.options.built_binary().display(), "Build finished");
        Ok(())
    }

    /// Copy the built binary into the prefix and make it executable.
    ///
    /// With sudo the copy is done by `install(1)`; otherwise directly.
    pub async fn install_binary(&self) -> InstallResult<PathBuf> {
        let source = self.options.built_binary();
        let target = self.options.installed_binary();

        if self.options.use_sudo {
            let install = elevated(
                true,
                "install",
                [
                    "-m".to_string(),
                    "755".to_string(),
                    source.to_string_lossy().into_owned(),
                    target.to_string_lossy().into_owned(),
                ],
            );
            self.run(&install).await?;
        } else {
            copy_executable(&source, &target).await?;
        }

        info!(target = %target.display(), "Installed");
        Ok(target)
    }

    /// Provision (unless skipped), fetch, build and install.
    ///
    /// `manager` is only consulted when dependencies are installed.
    pub async fn install(&self, manager: Option<PackageManager>) -> InstallResult<PathBuf> {
        if !self.options.skip_deps {
            let manager = manager.ok_or(InstallError::NoPackageManager)?;
            self.provision(manager).await?;
        }
        self.fetch_source().await?;
        self.build().await?;
        self.install_binary().await
    }

    async fn run(&self, invocation: &Invocation) -> InstallResult<()> {
        let outcome = self
            .runner
            .run(invocation)
            .await
            .map_err(|e| InstallError::command_failed(invocation.to_string(), e.to_string()))?;

        if outcome.success() {
            Ok(())
        } else {
            Err(InstallError::command_failed(
                invocation.to_string(),
                outcome.to_string(),
            ))
        }
    }
}

async fn copy_executable(source: &Path, target: &Path) -> InstallResult<()> {
    tokio::fs::copy(source, target)
        .await
        .map_err(|e| InstallError::io(source, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(target, std::fs::Permissions::from_mode(0o755))
            .await
            .map_err(|e| InstallError::io(target, e))?;
    }

    Ok(())
}
