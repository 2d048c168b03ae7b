//! Worker-wide constants.

use std::time::Duration;

/// Page size requested from the trending feed.
pub const TRENDING_PAGE_SIZE: u32 = 20;

/// Upper bound on trending pages fetched per invocation (100 records at most).
pub const TRENDING_MAX_PAGES: usize = 5;

/// Timeout for each trending page request.
pub const TRENDING_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of edge probes in flight at once during fallback warming.
pub const WARM_BATCH_SIZE: usize = 10;

/// Timeout for each edge probe.
pub const WARM_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Prefix of the CloudFront invalidation caller reference.
pub const INVALIDATION_REFERENCE_PREFIX: &str = "feed-prefetch-";

/// Object metadata key carrying the media correlation id.
pub const MEDIA_ID_METADATA_KEY: &str = "media-id";

/// Correlation id used when neither metadata nor file name provides one.
pub const UNKNOWN_MEDIA_ID: i64 = 0;

/// Default ClamAV scan timeout in seconds.
pub const CLAMAV_TIMEOUT_SECS: u64 = 30;
