//! Capability probe for optional package managers.
//!
//! The software-update task can drive several package managers, but only
//! winget ships with Windows; chocolatey, scoop and npm are optional. The
//! probe runs once at startup and records which managers resolve on PATH,
//! and the task catalog consults the result when building update tasks.

use crate::services::process::Tool;
use indexmap::IndexSet;
use tokio::process::Command;

/// Package managers the update adapter knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Winget,
    Choco,
    Scoop,
    Npm,
}

impl PackageManager {
    /// Probe order; also the order upgrades run in.
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Winget,
        PackageManager::Choco,
        PackageManager::Scoop,
        PackageManager::Npm,
    ];

    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Winget => "winget",
            PackageManager::Choco => "choco",
            PackageManager::Scoop => "scoop",
            PackageManager::Npm => "npm",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PackageManager::Winget => "WinGet",
            PackageManager::Choco => "Chocolatey",
            PackageManager::Scoop => "Scoop",
            PackageManager::Npm => "npm",
        }
    }

    pub fn tool(&self) -> Tool {
        match self {
            PackageManager::Winget => Tool::Winget,
            PackageManager::Choco => Tool::Choco,
            PackageManager::Scoop => Tool::Scoop,
            PackageManager::Npm => Tool::Npm,
        }
    }

    /// Arguments for an unattended upgrade of everything the manager tracks.
    pub fn upgrade_args(&self) -> Vec<String> {
        let args: &[&str] = match self {
            PackageManager::Winget => &[
                "upgrade",
                "--all",
                "--silent",
                "--accept-package-agreements",
                "--accept-source-agreements",
            ],
            PackageManager::Choco => &["upgrade", "all", "-y"],
            PackageManager::Scoop => &["update", "*"],
            PackageManager::Npm => &["update", "-g"],
        };
        args.iter().map(|s| s.to_string()).collect()
    }
}

/// Set of adapters available on this machine, computed once at startup.
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    managers: IndexSet<PackageManager>,
}

impl Capabilities {
    /// No optional tooling available. Probe results in tests start here.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Construct from a fixed manager list (tests and scripted scenarios).
    pub fn with_managers<I: IntoIterator<Item = PackageManager>>(managers: I) -> Self {
        Self {
            managers: managers.into_iter().collect(),
        }
    }

    pub fn is_available(&self, manager: PackageManager) -> bool {
        self.managers.contains(&manager)
    }

    pub fn any_package_manager(&self) -> bool {
        !self.managers.is_empty()
    }

    /// Available managers in probe order.
    pub fn package_managers(&self) -> Vec<PackageManager> {
        self.managers.iter().copied().collect()
    }
}

/// Locate each known manager on PATH.
///
/// Uses the platform locator (`where` / `which`) rather than invoking the
/// managers themselves: scoop is a shim script, and resolving it is all the
/// probe needs to know.
pub async fn probe() -> Capabilities {
    let locator = if cfg!(windows) { "where" } else { "which" };
    let mut managers = IndexSet::new();

    for manager in PackageManager::ALL {
        match Command::new(locator).arg(manager.command()).output().await {
            Ok(output) if output.status.success() => {
                tracing::info!("Detected package manager: {}", manager.label());
                managers.insert(manager);
            }
            Ok(_) => {
                tracing::debug!("Package manager not found: {}", manager.label());
            }
            Err(e) => {
                tracing::debug!("Probe for {} failed: {}", manager.label(), e);
            }
        }
    }

    Capabilities { managers }
}
