//! CDN refresh for the trending set.

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use url::Url;
use vw_core::constants::INVALIDATION_REFERENCE_PREFIX;
use vw_core::models::VideoRecord;
use vw_services::{CdnInvalidator, InvalidationRequest};

use super::warmer::CacheWarmer;
use crate::logging::log_error;

const MANIFEST_SUFFIX: &str = ".m3u8";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// No distribution id configured.
    NotConfigured,
    /// The trending set produced no paths.
    NoPaths,
}

/// What a prewarm run ended up doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "status",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum PrewarmOutcome {
    Skipped {
        reason: SkipReason,
    },
    Invalidated {
        invalidation_id: Option<String>,
        path_count: usize,
    },
    FellBackToWarm {
        reason: String,
        path_count: usize,
    },
}

fn url_path(raw: &str, video_id: &str) -> Option<String> {
    match Url::parse(raw) {
        Ok(url) => Some(url.path().to_string()),
        Err(e) => {
            tracing::warn!(video_id = %video_id, url = %raw, error = %e, "Skipping unparsable URL");
            None
        }
    }
}

/// CDN paths for every video, in feed order.
///
/// Each video contributes the path of its `videoUrl` (when non-empty) and of
/// its HLS manifest. A manifest ending in `.m3u8` also contributes a glob over
/// its segment directory, e.g. `/x/y.m3u8` adds `/x/y/*`. Duplicates are kept.
pub fn derive_paths(videos: &[VideoRecord]) -> Vec<String> {
    let mut paths = Vec::new();

    for video in videos {
        if !video.video_url.is_empty() {
            if let Some(path) = url_path(&video.video_url, &video.id) {
                paths.push(path);
            }
        }

        if let Some(manifest) = video.hls_manifest_url.as_deref() {
            if let Some(path) = url_path(manifest, &video.id) {
                let glob = path
                    .strip_suffix(MANIFEST_SUFFIX)
                    .map(|stem| format!("{}/*", stem));
                paths.push(path);
                paths.extend(glob);
            }
        }
    }

    paths
}

/// Refreshes the CDN copies of trending videos.
#[derive(Clone)]
pub struct CachePrewarmer {
    distribution_id: Option<String>,
    invalidator: Arc<dyn CdnInvalidator>,
    warmer: CacheWarmer,
}

impl CachePrewarmer {
    pub fn new(
        distribution_id: Option<String>,
        invalidator: Arc<dyn CdnInvalidator>,
        warmer: CacheWarmer,
    ) -> Self {
        Self {
            distribution_id,
            invalidator,
            warmer,
        }
    }

    /// Invalidate every derived path in one request, or probe them through the
    /// edge when the invalidation API rejects the request.
    pub async fn prewarm(&self, videos: &[VideoRecord]) -> PrewarmOutcome {
        let Some(distribution_id) = self.distribution_id.as_deref() else {
            tracing::warn!("CloudFront distribution id not configured, skipping prewarm");
            return PrewarmOutcome::Skipped {
                reason: SkipReason::NotConfigured,
            };
        };

        let paths = derive_paths(videos);
        if paths.is_empty() {
            tracing::info!(videos = videos.len(), "No CDN paths to prewarm");
            return PrewarmOutcome::Skipped {
                reason: SkipReason::NoPaths,
            };
        }

        let request = InvalidationRequest {
            distribution_id: distribution_id.to_string(),
            paths,
            caller_reference: format!(
                "{}{}",
                INVALIDATION_REFERENCE_PREFIX,
                Utc::now().timestamp_millis()
            ),
        };

        match self.invalidator.create_invalidation(&request).await {
            Ok(invalidation_id) => {
                tracing::info!(
                    invalidation_id = ?invalidation_id,
                    path_count = request.paths.len(),
                    caller_reference = %request.caller_reference,
                    "CloudFront invalidation created"
                );
                PrewarmOutcome::Invalidated {
                    invalidation_id,
                    path_count: request.paths.len(),
                }
            }
            Err(e) => {
                log_error(&e, "create_invalidation");
                tracing::warn!(
                    path_count = request.paths.len(),
                    "Invalidation failed, falling back to edge warming"
                );
                self.warmer.warm(&request.paths).await;
                PrewarmOutcome::FellBackToWarm {
                    reason: e.to_string(),
                    path_count: request.paths.len(),
                }
            }
        }
    }
}
