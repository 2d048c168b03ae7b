//! HTTP client for the trending feed endpoint.

use reqwest::Client;
use vw_core::constants::{TRENDING_PAGE_SIZE, TRENDING_REQUEST_TIMEOUT};
use vw_core::models::FeedPage;
use vw_core::{AppError, PrefetchConfig};

/// Client for `GET {base}/feed/trending` with bearer service auth.
#[derive(Clone, Debug)]
pub struct FeedClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl FeedClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(TRENDING_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        if token.is_none() {
            tracing::warn!(
                "Service token not configured, trending requests will be unauthenticated"
            );
        }

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &PrefetchConfig) -> Result<Self, AppError> {
        Self::new(config.api_url.clone(), config.service_token.clone())
    }

    /// Fetch one page of trending videos.
    ///
    /// Network errors, timeouts, non-2xx statuses and undecodable bodies are all
    /// reported as [`AppError::Upstream`].
    pub async fn fetch_page(&self, cursor: Option<&str>) -> Result<FeedPage, AppError> {
        let url = format!("{}/feed/trending", self.base_url);

        let mut query = vec![("limit", TRENDING_PAGE_SIZE.to_string())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }

        let mut request = self
            .client
            .get(&url)
            .query(&query)
            .header("Content-Type", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upstream(format!(
                "Trending feed returned status {}: {}",
                status, error_text
            )));
        }

        response
            .json::<FeedPage>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse trending page: {}", e)))
    }
}
