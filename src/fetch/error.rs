//! Transport error types.

use thiserror::Error;

/// Errors raised while retrieving remote content.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or HTTP client error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Writing the downloaded content failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Body could not be decoded as the expected JSON document
    #[error("Invalid JSON from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// HTTP status code, if the failure came from the server
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
