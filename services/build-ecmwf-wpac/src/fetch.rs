//! Chart fetching capability.
//!
//! The pipeline only needs "GET this URL and give me the status and a body
//! stream", so that is all the trait exposes. Tests substitute a stub.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

/// Response to a single chart request.
pub struct ChartResponse {
    pub status: StatusCode,
    pub body: BoxStream<'static, Result<Bytes>>,
}

impl ChartResponse {
    /// Response with the whole body in one chunk.
    pub fn from_bytes(status: StatusCode, body: impl Into<Bytes>) -> Self {
        let chunk: Result<Bytes> = Ok(body.into());
        Self {
            status,
            body: futures::stream::iter(vec![chunk]).boxed(),
        }
    }
}

impl std::fmt::Debug for ChartResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Trait for sources that can fetch chart images.
#[async_trait]
pub trait ChartFetcher: Send + Sync {
    /// Issue one GET request. Transport failures are errors; HTTP error
    /// statuses are returned in the response.
    async fn get(&self, url: &str) -> Result<ChartResponse>;
}

/// Fetches charts over HTTP.
pub struct HttpChartFetcher {
    client: Client,
}

impl HttpChartFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(30)))
            .user_agent(concat!("build-ecmwf-wpac/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ChartFetcher for HttpChartFetcher {
    #[instrument(skip(self))]
    async fn get(&self, url: &str) -> Result<ChartResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        debug!(status = %status, "Chart response");

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.context("Error reading response chunk"))
            .boxed();

        Ok(ChartResponse { status, body })
    }
}
