use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Response};

use super::{ByteStream, FetchError, FetchResult, Transport};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`Transport`] backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> FetchResult<Self> {
        Self::with_options(DEFAULT_TIMEOUT, concat!("fnstamp/", env!("CARGO_PKG_VERSION")))
    }

    pub fn with_options(timeout: Duration, user_agent: &str) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> FetchResult<Response> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::status(url, response.status().as_u16()));
        }

        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_stream(&self, url: &str) -> FetchResult<ByteStream> {
        let response = self.get(url).await?;
        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(FetchError::from))
            .boxed())
    }

    async fn fetch_body(&self, url: &str) -> FetchResult<String> {
        let response = self.get(url).await?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_body_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/hello/.env"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("GREETING=hi\n"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let body = transport
            .fetch_body(&format!("{}/hello/.env", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(body, "GREETING=hi\n");
    }

    #[tokio::test]
    async fn test_fetch_body_non_success_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let err = transport
            .fetch_body(&format!("{}/missing", mock_server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_stream_collects_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fn.js"))
            .respond_with(ResponseTemplate::new(200).set_body_string("exports.handler = () => {};"))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let mut stream = transport
            .fetch_stream(&format!("{}/fn.js", mock_server.uri()))
            .await
            .unwrap();

        let mut body = Vec::new();
        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(body, b"exports.handler = () => {};");
    }

    #[tokio::test]
    async fn test_fetch_stream_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/boom"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let result = transport
            .fetch_stream(&format!("{}/boom", mock_server.uri()))
            .await;

        match result {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 500),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected a status error"),
        }
    }
}
