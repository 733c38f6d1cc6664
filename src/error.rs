use std::path::PathBuf;

use thiserror::Error;

use crate::fetch::FetchError;
use crate::installer::InstallError;

#[derive(Error, Debug)]
pub enum FnStampError {
    #[error("Function with name \"{name}\" already exists at {}", .path.display())]
    DuplicateFunction { name: String, path: PathBuf },

    #[error("Target directory {} is not usable: {reason}", .path.display())]
    TargetDirectory { path: PathBuf, reason: String },

    #[error("Invalid function name \"{name}\": {reason}")]
    InvalidFunctionName { name: String, reason: String },

    #[error("More than one {kind} descriptor given; each kind may appear once")]
    DuplicateDescriptor { kind: String },

    #[error("No files to install. Pass --function, --env, --manifest or --descriptors")]
    NoDescriptors,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Dependency installation failed: {0}")]
    Install(#[from] InstallError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FnStampError>;
