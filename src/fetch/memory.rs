//! In-memory transport used by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;

use super::{ByteStream, FetchError, FetchResult, Transport};

/// Serves fixed bodies by URL and counts every request. Unknown URLs answer 404.
#[derive(Default)]
pub struct MemoryTransport {
    bodies: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, url: &str) -> FetchResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::status(url, 404))
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn fetch_stream(&self, url: &str) -> FetchResult<ByteStream> {
        let body = self.lookup(url)?;
        // Split into two chunks so writers see more than one piece.
        let mut tail = Bytes::from(body.into_bytes());
        let head = tail.split_to(tail.len() / 2);
        Ok(futures::stream::iter(vec![Ok(head), Ok(tail)]).boxed())
    }

    async fn fetch_body(&self, url: &str) -> FetchResult<String> {
        self.lookup(url)
    }
}
