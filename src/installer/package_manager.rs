//! Node package manager selection and invocation.

use std::ffi::OsString;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Dependencies, InstallError, Installer};

/// A concrete package manager binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Pick a manager from the lock file present in `dir`, defaulting to npm.
    pub fn detect(dir: &Path) -> Self {
        if dir.join("yarn.lock").exists() {
            PackageManager::Yarn
        } else if dir.join("pnpm-lock.yaml").exists() {
            PackageManager::Pnpm
        } else {
            PackageManager::Npm
        }
    }

    /// Arguments that add `dependencies` to the project manifest.
    pub fn install_args(&self, dependencies: &Dependencies) -> Vec<String> {
        let mut args: Vec<String> = match self {
            PackageManager::Npm => vec!["install".into(), "--save".into()],
            PackageManager::Yarn | PackageManager::Pnpm => vec!["add".into()],
        };
        args.extend(
            dependencies
                .iter()
                .map(|(name, version)| format!("{name}@{version}")),
        );
        args
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            "pnpm" => Ok(PackageManager::Pnpm),
            other => Err(format!("unknown package manager: {other}")),
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// Configured choice: a fixed manager, or detection from lock files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerPreference {
    #[default]
    Auto,
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManagerPreference {
    pub fn resolve(&self, dir: &Path) -> PackageManager {
        match self {
            PackageManagerPreference::Auto => PackageManager::detect(dir),
            PackageManagerPreference::Npm => PackageManager::Npm,
            PackageManagerPreference::Yarn => PackageManager::Yarn,
            PackageManagerPreference::Pnpm => PackageManager::Pnpm,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManagerPreference::Auto => "auto",
            PackageManagerPreference::Npm => "npm",
            PackageManagerPreference::Yarn => "yarn",
            PackageManagerPreference::Pnpm => "pnpm",
        }
    }
}

impl FromStr for PackageManagerPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(PackageManagerPreference::Auto);
        }
        s.parse::<PackageManager>().map(|pm| match pm {
            PackageManager::Npm => PackageManagerPreference::Npm,
            PackageManager::Yarn => PackageManagerPreference::Yarn,
            PackageManager::Pnpm => PackageManagerPreference::Pnpm,
        })
    }
}

/// [`Installer`] that shells out to npm, yarn or pnpm.
#[derive(Debug, Clone, Default)]
pub struct PackageManagerInstaller {
    preference: PackageManagerPreference,
    search_path: Option<OsString>,
}

impl PackageManagerInstaller {
    pub fn new(preference: PackageManagerPreference) -> Self {
        Self {
            preference,
            search_path: None,
        }
    }

    /// Look up manager binaries in `paths` instead of `PATH`.
    pub fn with_search_path(mut self, paths: impl Into<OsString>) -> Self {
        self.search_path = Some(paths.into());
        self
    }

    fn locate(&self, manager: PackageManager, cwd: &Path) -> Result<std::path::PathBuf, InstallError> {
        let found = match &self.search_path {
            Some(paths) => which::which_in(manager.binary(), Some(paths), cwd),
            None => which::which(manager.binary()),
        };
        found.map_err(|_| InstallError::ManagerNotFound {
            manager: manager.to_string(),
        })
    }
}

#[async_trait]
impl Installer for PackageManagerInstaller {
    async fn install(&self, dependencies: &Dependencies, cwd: &Path) -> Result<(), InstallError> {
        if dependencies.is_empty() {
            tracing::debug!("No dependencies to install");
            return Ok(());
        }

        let manager = self.preference.resolve(cwd);
        let binary = self.locate(manager, cwd)?;

        tracing::info!(%manager, count = dependencies.len(), cwd = %cwd.display(), "Installing dependencies");

        let output = tokio::process::Command::new(binary)
            .args(manager.install_args(dependencies))
            .current_dir(cwd)
            .output()
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            Err(InstallError::CommandFailed {
                manager: manager.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
