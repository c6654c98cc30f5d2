//! lvc-install - builds lvc from source and installs it system-wide.

use anyhow::Context;
use clap::Parser;
use lvc_installer::prompt::{pause, welcome_banner};
use lvc_installer::{
    check_platform, InstallError, InstallOptions, Installer, PackageManager, DEFAULT_CHECKOUT_DIR,
    DEFAULT_PREFIX, DEFAULT_REPO_URL,
};
use lvc_util::log::{self, LogConfig, LogLevel};
use lvc_util::SystemRunner;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;

#[derive(Parser)]
#[command(name = "lvc-install")]
#[command(version, about = "Install lvc from source (Linux only)", long_about = None)]
struct Cli {
    /// Do not wait for Enter before and after installing
    #[arg(short, long)]
    yes: bool,

    /// Run package manager and install commands without sudo
    #[arg(long)]
    no_sudo: bool,

    /// Skip installing git and the Rust toolchain
    #[arg(long)]
    skip_deps: bool,

    /// Repository to clone
    #[arg(long, default_value = DEFAULT_REPO_URL)]
    repo: String,

    /// Directory to clone into
    #[arg(long, default_value = DEFAULT_CHECKOUT_DIR)]
    dir: PathBuf,

    /// Directory to install the binary into
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> InstallOptions {
        InstallOptions {
            repo_url: self.repo.clone(),
            checkout_dir: self.dir.clone(),
            prefix: self.prefix.clone(),
            use_sudo: !self.no_sudo,
            skip_deps: self.skip_deps,
        }
    }
}

async fn wait_for_enter(message: &str) -> anyhow::Result<()> {
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    pause(&mut stdin, &mut stdout, message)
        .await
        .context("Failed to read from the terminal")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    log::init(LogConfig {
        print: true,
        level: if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        },
        include_location: false,
    });

    check_platform(std::env::consts::OS)?;

    if cli.yes {
        println!("{}", welcome_banner());
    } else {
        wait_for_enter(&welcome_banner()).await?;
    }

    let manager = if cli.skip_deps {
        None
    } else {
        let manager = PackageManager::detect().ok_or(InstallError::NoPackageManager)?;
        println!("Using package manager: {}", manager);
        Some(manager)
    };

    let installer = Installer::new(Arc::new(SystemRunner::new()), cli.options());
    let installed = installer
        .install(manager)
        .await
        .context("Installation failed")?;

    let done = format!(
        "All installation steps completed successfully! lvc is at {}",
        installed.display()
    );
    if cli.yes {
        println!("{}", done);
    } else {
        wait_for_enter(&done).await?;
    }

    Ok(())
}
