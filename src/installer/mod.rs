//! Dependency installation.
//!
//! A function ships a manifest fragment (a `package.json`-like document). Only
//! its `dependencies` map is read; resolving versions and lock files is left
//! to the [`Installer`].

mod error;
mod package_manager;
#[cfg(test)]
pub(crate) mod recording;

use std::path::Path;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Result;
use crate::fetch::ContentFetcher;

pub use error::InstallError;
pub use package_manager::{PackageManager, PackageManagerInstaller, PackageManagerPreference};

/// Package name to version constraint, in manifest order.
pub type Dependencies = IndexMap<String, String>;

/// The part of a fetched manifest this crate reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub dependencies: Dependencies,
}

/// External capability that installs a dependency map into a project.
#[async_trait]
pub trait Installer: Send + Sync {
    async fn install(&self, dependencies: &Dependencies, cwd: &Path) -> std::result::Result<(), InstallError>;
}

/// Fetch the manifest at `manifest_url` and install its dependencies into
/// `target_dir`. Returns the installed dependency map.
pub async fn install_dependencies(
    fetcher: &ContentFetcher,
    installer: &dyn Installer,
    manifest_url: &str,
    target_dir: &Path,
) -> Result<Dependencies> {
    let manifest: Manifest = fetcher.fetch_json(manifest_url).await?;
    installer.install(&manifest.dependencies, target_dir).await?;
    Ok(manifest.dependencies)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::recording::RecordingInstaller;
    use super::*;
    use crate::error::FnStampError;
    use crate::fetch::memory::MemoryTransport;

    #[tokio::test]
    async fn test_install_dependencies_delegates_map_and_cwd() {
        let transport = MemoryTransport::new().with(
            "mem://package.json",
            r#"{"name":"fn","dependencies":{"twilio":"^3.0.0","got":"9.6.0"}}"#,
        );
        let fetcher = ContentFetcher::new(Arc::new(transport));
        let installer = RecordingInstaller::default();
        let temp_dir = tempfile::tempdir().unwrap();

        let installed = install_dependencies(&fetcher, &installer, "mem://package.json", temp_dir.path())
            .await
            .unwrap();

        assert_eq!(installed.keys().collect::<Vec<_>>(), vec!["twilio", "got"]);
        let calls = installer.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, installed);
        assert_eq!(calls[0].1, temp_dir.path());
    }

    #[tokio::test]
    async fn test_manifest_without_dependencies_installs_empty_map() {
        let transport = MemoryTransport::new().with("mem://package.json", r#"{"name":"fn"}"#);
        let fetcher = ContentFetcher::new(Arc::new(transport));
        let installer = RecordingInstaller::default();

        let installed = install_dependencies(&fetcher, &installer, "mem://package.json", Path::new("."))
            .await
            .unwrap();

        assert!(installed.is_empty());
        assert_eq!(installer.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_installer_failure_is_surfaced() {
        let transport =
            MemoryTransport::new().with("mem://package.json", r#"{"dependencies":{"a":"1"}}"#);
        let fetcher = ContentFetcher::new(Arc::new(transport));
        let installer = RecordingInstaller::failing();

        let err = install_dependencies(&fetcher, &installer, "mem://package.json", Path::new("."))
            .await
            .unwrap_err();

        assert!(matches!(err, FnStampError::Install(InstallError::CommandFailed { .. })));
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_installer() {
        let fetcher = ContentFetcher::new(Arc::new(MemoryTransport::new()));
        let installer = RecordingInstaller::default();

        let err = install_dependencies(&fetcher, &installer, "mem://nope", Path::new("."))
            .await
            .unwrap_err();

        assert!(matches!(err, FnStampError::Fetch(_)));
        assert!(installer.calls().is_empty());
    }
}
