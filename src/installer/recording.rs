//! Installer double that records its calls.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Dependencies, InstallError, Installer};

#[derive(Default)]
pub struct RecordingInstaller {
    calls: Mutex<Vec<(Dependencies, PathBuf)>>,
    fail: bool,
}

impl RecordingInstaller {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(Dependencies, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Installer for RecordingInstaller {
    async fn install(&self, dependencies: &Dependencies, cwd: &Path) -> Result<(), InstallError> {
        self.calls
            .lock()
            .unwrap()
            .push((dependencies.clone(), cwd.to_path_buf()));

        if self.fail {
            return Err(InstallError::CommandFailed {
                manager: "npm".to_string(),
                code: Some(1),
                stderr: "install failed".to_string(),
            });
        }
        Ok(())
    }
}
