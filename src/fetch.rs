//! The cancellable HTTP fetch seam
//!
//! A [`Fetcher`] performs exactly one GET and returns raw bytes; no
//! business logic lives at this layer. The coordinator and the image load
//! manager are written against the trait so tests can inject doubles that
//! resolve in any order.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Ways a fetch can complete without a payload
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport acknowledged a cancellation request. Expected and
    /// silent: superseded work reports this instead of a payload.
    #[error("fetch cancelled")]
    Cancelled,
    /// The endpoint answered with a non-success status.
    #[error("http status {0}")]
    Status(u16),
    /// Connection, DNS or timeout failure below the HTTP layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One cancellable GET returning raw bytes
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Production fetcher backed by a shared reqwest client
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
