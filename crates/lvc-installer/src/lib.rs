//! Source installer for lvc on Linux.
//!
//! Installs git and a Rust toolchain with the system package manager, clones
//! the lvc repository, builds the `lvc` binary and copies it into a prefix
//! such as `/usr/bin`. External programs run through
//! [`lvc_util::CommandRunner`], so every step can be exercised without
//! touching the system.

pub mod error;
pub mod installer;
pub mod package;
pub mod prompt;

pub use error::{InstallError, InstallResult};
pub use installer::{check_platform, InstallOptions, Installer};
pub use package::PackageManager;

/// Name of the installed binary.
pub const BINARY_NAME: &str = "lvc";

/// Shown in the welcome banner.
pub const AUTHOR_NAME: &str = "VPeti11";

/// Repository cloned by default.
pub const DEFAULT_REPO_URL: &str = "https://gitlab.com/VPeti11/LVC.git";

/// Checkout directory, relative to where the installer runs.
pub const DEFAULT_CHECKOUT_DIR: &str = "LVC";

/// Install prefix.
pub const DEFAULT_PREFIX: &str = "/usr/bin";
