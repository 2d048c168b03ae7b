//! Existence probes against the CDN edge.

use async_trait::async_trait;
use reqwest::Client;
use vw_core::constants::WARM_PROBE_TIMEOUT;
use vw_core::AppError;

/// Issues one lightweight request that makes the edge fetch and cache a URL.
#[async_trait]
pub trait EdgeProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<(), AppError>;
}

/// `HEAD` probe over HTTP; non-2xx responses are failures.
#[derive(Clone, Debug)]
pub struct HttpEdgeProbe {
    client: Client,
}

impl HttpEdgeProbe {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(WARM_PROBE_TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl EdgeProbe for HttpEdgeProbe {
    async fn probe(&self, url: &str) -> Result<(), AppError> {
        self.client
            .head(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map(|_| ())
            .map_err(|e| AppError::Cdn(format!("HEAD {} failed: {}", url, e)))
    }
}
