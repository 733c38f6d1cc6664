//! Content fetching.
//!
//! The [`Transport`] trait is the seam to the network: it hands back either a
//! byte stream or a whole body for a content address. [`ContentFetcher`] sits
//! on top of a transport and adds the file-writing and JSON decoding the
//! materialization tasks need.

pub mod error;
pub mod http;
#[cfg(test)]
pub(crate) mod memory;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;

pub use error::{FetchError, FetchResult};
pub use http::HttpTransport;

/// Stream of body chunks returned by [`Transport::fetch_stream`].
pub type ByteStream = BoxStream<'static, FetchResult<Bytes>>;

/// Network access used by the fetcher.
///
/// Implementations must treat any non-success response as an error, and
/// `fetch_stream` must only resolve once the response status is known to be
/// successful.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch_stream(&self, url: &str) -> FetchResult<ByteStream>;

    async fn fetch_body(&self, url: &str) -> FetchResult<String>;
}

/// Retrieves remote content into files or memory.
#[derive(Clone)]
pub struct ContentFetcher {
    transport: Arc<dyn Transport>,
}

impl ContentFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Stream `url` into `destination`, creating or truncating the file.
    ///
    /// The destination is opened only after the transport confirmed a
    /// successful response. If the stream fails midway, the partially written
    /// file is left in place. Returns the number of bytes written.
    pub async fn fetch_to_file(&self, url: &str, destination: &Path) -> FetchResult<u64> {
        let mut stream = self.transport.fetch_stream(url).await?;

        let mut file = tokio::fs::File::create(destination).await?;
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!(url, path = %destination.display(), bytes = written, "Downloaded file");
        Ok(written)
    }

    /// Fetch the whole body of `url` as text.
    pub async fn fetch_body(&self, url: &str) -> FetchResult<String> {
        self.transport.fetch_body(url).await
    }

    /// Fetch `url` and decode the body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> FetchResult<T> {
        let body = self.transport.fetch_body(url).await?;
        serde_json::from_str(&body).map_err(|source| FetchError::InvalidJson {
            url: url.to_string(),
            source,
        })
    }
}
