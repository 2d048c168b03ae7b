use vw_core::constants::TRENDING_MAX_PAGES;
use vw_core::models::VideoRecord;
use vw_services::FeedClient;

use crate::logging::log_error;

/// Collects trending videos across pages.
#[derive(Clone, Debug)]
pub struct TrendingFetcher {
    client: FeedClient,
}

impl TrendingFetcher {
    pub fn new(client: FeedClient) -> Self {
        Self { client }
    }

    /// Follow the feed cursor for at most [`TRENDING_MAX_PAGES`] pages.
    ///
    /// A failed page ends pagination; whatever was collected before it is
    /// returned and the failure is only logged.
    pub async fn fetch_trending(&self) -> Vec<VideoRecord> {
        let mut videos = Vec::new();
        let mut cursor: Option<String> = None;

        for page_number in 1..=TRENDING_MAX_PAGES {
            match self.client.fetch_page(cursor.as_deref()).await {
                Ok(page) => {
                    tracing::debug!(
                        page = page_number,
                        count = page.videos.len(),
                        has_more = page.has_more,
                        "Fetched trending page"
                    );
                    videos.extend(page.videos);
                    if !page.has_more {
                        break;
                    }
                    cursor = page.next_cursor;
                }
                Err(e) => {
                    log_error(&e, "fetch_trending_page");
                    tracing::info!(
                        page = page_number,
                        collected = videos.len(),
                        "Trending pagination stopped, keeping partial results"
                    );
                    break;
                }
            }
        }

        videos
    }
}
