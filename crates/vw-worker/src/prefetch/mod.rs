//! Trending feed prefetch.
//!
//! Runs on a schedule: fetch the trending set, then refresh the CDN for it.

pub mod prewarm;
pub mod trending;
pub mod warmer;

pub use prewarm::{derive_paths, CachePrewarmer, PrewarmOutcome, SkipReason};
pub use trending::TrendingFetcher;
pub use warmer::{CacheWarmer, WarmSummary};

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use vw_core::Config;
use vw_services::{CloudFrontInvalidator, FeedClient, HttpEdgeProbe};

/// Result of one prefetch invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefetchReport {
    pub videos_fetched: usize,
    pub outcome: PrewarmOutcome,
}

pub struct FeedPrefetchWorker {
    fetcher: TrendingFetcher,
    prewarmer: CachePrewarmer,
}

impl FeedPrefetchWorker {
    pub fn new(fetcher: TrendingFetcher, prewarmer: CachePrewarmer) -> Self {
        Self { fetcher, prewarmer }
    }

    /// Build the worker with its production clients.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let client =
            FeedClient::from_config(&config.prefetch).context("Failed to build trending client")?;
        let probe = HttpEdgeProbe::new().context("Failed to build edge probe client")?;
        let invalidator = CloudFrontInvalidator::new(&config.base.aws_region).await;

        let warmer = CacheWarmer::new(Arc::new(probe), &config.prefetch.cloudfront_domain);
        let prewarmer = CachePrewarmer::new(
            config.prefetch.cloudfront_distribution_id.clone(),
            Arc::new(invalidator),
            warmer,
        );

        Ok(Self::new(TrendingFetcher::new(client), prewarmer))
    }

    #[tracing::instrument(skip_all)]
    pub async fn handle(&self, event: &serde_json::Value) -> Result<PrefetchReport> {
        tracing::info!(event = %event, "Feed prefetch triggered");

        let videos = self.fetcher.fetch_trending().await;
        tracing::info!(count = videos.len(), "Fetched trending videos");

        let outcome = self.prewarmer.prewarm(&videos).await;

        Ok(PrefetchReport {
            videos_fetched: videos.len(),
            outcome,
        })
    }
}
