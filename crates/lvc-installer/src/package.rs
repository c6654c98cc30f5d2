//! Package manager detection and dependency installation commands.

use lvc_util::Invocation;
use std::fmt;

/// A supported system package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Dnf,
    Pacman,
}

impl PackageManager {
    /// All supported managers, in detection order.
    pub const ALL: [PackageManager; 3] = [Self::Apt, Self::Dnf, Self::Pacman];

    /// Executable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Dnf => "dnf",
            Self::Pacman => "pacman",
        }
    }

    /// First supported manager found on `PATH`.
    pub fn detect() -> Option<Self> {
        Self::detect_with(|program| which::which(program).is_ok())
    }

    /// First supported manager for which `exists` returns true.
    pub fn detect_with(exists: impl Fn(&str) -> bool) -> Option<Self> {
        Self::ALL.into_iter().find(|pm| exists(pm.name()))
    }

    /// Packages providing git and a Rust toolchain.
    pub fn dependency_packages(&self) -> &'static [&'static str] {
        match self {
            Self::Apt | Self::Dnf => &["git", "cargo"],
            Self::Pacman => &["git", "rust"],
        }
    }

    /// Index refresh to run before installing, if this manager needs one.
    ///
    /// Failure of this step is tolerated.
    pub fn refresh_invocation(&self, sudo: bool) -> Option<Invocation> {
        match self {
            Self::Apt => Some(elevated(sudo, self.name(), ["update"])),
            Self::Dnf | Self::Pacman => None,
        }
    }

    /// Non-interactive install of [`Self::dependency_packages`].
    pub fn install_invocation(&self, sudo: bool) -> Invocation {
        let base: &[&str] = match self {
            Self::Apt | Self::Dnf => &["install", "-y"],
            Self::Pacman => &["-Syu", "--noconfirm"],
        };
        let args = base.iter().chain(self.dependency_packages()).copied();
        elevated(sudo, self.name(), args)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `program args...`, prefixed with `sudo` when requested.
pub fn elevated<I, S>(sudo: bool, program: &str, args: I) -> Invocation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    if sudo {
        Invocation::new("sudo").arg(program).args(args)
    } else {
        Invocation::new(program).args(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_order() {
        assert_eq!(PackageManager::detect_with(|_| true), Some(PackageManager::Apt));
        assert_eq!(
            PackageManager::detect_with(|p| p == "pacman" || p == "dnf"),
            Some(PackageManager::Dnf)
        );
        assert_eq!(PackageManager::detect_with(|_| false), None);
    }

    #[test]
    fn test_install_invocations() {
        assert_eq!(
            PackageManager::Apt.install_invocation(true).to_string(),
            "sudo apt install -y git cargo"
        );
        assert_eq!(
            PackageManager::Dnf.install_invocation(false).to_string(),
            "dnf install -y git cargo"
        );
        assert_eq!(
            PackageManager::Pacman.install_invocation(true).to_string(),
            "sudo pacman -Syu --noconfirm git rust"
        );
    }

    #[test]
    fn test_only_apt_refreshes() {
        assert_eq!(
            PackageManager::Apt
                .refresh_invocation(true)
                .map(|i| i.to_string()),
            Some("sudo apt update".to_string())
        );
        assert!(PackageManager::Dnf.refresh_invocation(true).is_none());
        assert!(PackageManager::Pacman.refresh_invocation(false).is_none());
    }
}
