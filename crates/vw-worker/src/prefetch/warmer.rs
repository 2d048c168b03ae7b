use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use vw_core::constants::WARM_BATCH_SIZE;
use vw_services::EdgeProbe;

/// Attempted and failed probe counts of one warm run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WarmSummary {
    pub attempted: usize,
    pub failed: usize,
}

/// Fallback warmer: asks the edge for each path so it caches a fresh copy.
#[derive(Clone)]
pub struct CacheWarmer {
    probe: Arc<dyn EdgeProbe>,
    base_url: String,
}

impl CacheWarmer {
    pub fn new(probe: Arc<dyn EdgeProbe>, edge_domain: &str) -> Self {
        Self::with_base_url(probe, format!("https://{}", edge_domain))
    }

    pub fn with_base_url(probe: Arc<dyn EdgeProbe>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            probe,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probe every path, [`WARM_BATCH_SIZE`] at a time.
    ///
    /// A batch fully settles before the next one starts. Probe failures are
    /// counted and logged at debug level, never returned.
    pub async fn warm(&self, paths: &[String]) -> WarmSummary {
        let mut summary = WarmSummary::default();

        for batch in paths.chunks(WARM_BATCH_SIZE) {
            let probes = batch.iter().map(|path| {
                let url = self.url_for(path);
                async move {
                    let result = self.probe.probe(&url).await;
                    if let Err(e) = &result {
                        tracing::debug!(url = %url, error = %e, "Edge probe failed");
                    }
                    result.is_ok()
                }
            });

            let results = join_all(probes).await;
            summary.attempted += results.len();
            summary.failed += results.iter().filter(|ok| !**ok).count();
        }

        tracing::info!(
            attempted = summary.attempted,
            failed = summary.failed,
            "Fallback cache warming finished"
        );
        summary
    }
}
