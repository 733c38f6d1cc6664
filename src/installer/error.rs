use thiserror::Error;

/// Failures reported by a package manager.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Package manager '{manager}' not found in PATH")]
    ManagerNotFound { manager: String },

    #[error("Could not start package manager: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("'{manager}' exited with {}: {stderr}", .code.map(|c| format!("code {c}")).unwrap_or_else(|| "a signal".to_string()))]
    CommandFailed {
        manager: String,
        code: Option<i32>,
        stderr: String,
    },
}
