use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FnStampError, Result};
use crate::installer::PackageManagerPreference;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory, relative to the target project, that holds function code.
    #[serde(default = "default_functions_dir")]
    pub functions_dir: String,
    /// Extension of materialized function files (without the dot).
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
    /// Name of the environment document in the target project.
    #[serde(default = "default_env_file")]
    pub env_file: String,
    #[serde(default)]
    pub package_manager: PackageManagerPreference,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_functions_dir() -> String {
    "functions".to_string()
}

fn default_source_extension() -> String {
    "js".to_string()
}

fn default_env_file() -> String {
    ".env".to_string()
}

fn default_http_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("fnstamp/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            functions_dir: default_functions_dir(),
            source_extension: default_source_extension(),
            env_file: default_env_file(),
            package_manager: PackageManagerPreference::Auto,
            http_timeout_secs: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| FnStampError::Config("Could not determine config directory".to_string()))?;
        Ok(base.join("fnstamp"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Load the user config, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| FnStampError::Config(format!("Invalid config {}: {}", path.display(), e)))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("FNSTAMP_PACKAGE_MANAGER") {
            match value.parse::<PackageManagerPreference>() {
                Ok(pref) => self.package_manager = pref,
                Err(_) => tracing::warn!(value, "Ignoring unknown FNSTAMP_PACKAGE_MANAGER"),
            }
        }

        if let Ok(value) = std::env::var("FNSTAMP_HTTP_TIMEOUT") {
            match value.trim().parse::<u64>() {
                Ok(secs) => self.http_timeout_secs = secs,
                Err(_) => tracing::warn!(value, "Ignoring invalid FNSTAMP_HTTP_TIMEOUT"),
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| FnStampError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let ext = &self.source_extension;
        if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(FnStampError::Config(format!(
                "Invalid source_extension '{}'. Use a bare extension like 'js' or 'ts'",
                ext
            )));
        }

        if self.functions_dir.is_empty() || Path::new(&self.functions_dir).is_absolute() {
            return Err(FnStampError::Config(format!(
                "Invalid functions_dir '{}'. It must be a relative path",
                self.functions_dir
            )));
        }

        if self.env_file.is_empty() || self.env_file.contains(['/', '\\']) {
            return Err(FnStampError::Config(format!(
                "Invalid env_file '{}'. It must be a plain file name",
                self.env_file
            )));
        }

        if self.http_timeout_secs == 0 {
            return Err(FnStampError::Config(
                "http_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
