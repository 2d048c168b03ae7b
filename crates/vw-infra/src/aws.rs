//! Process-wide AWS SDK configuration.
//!
//! Clients for CloudFront, S3 and SNS are all built from one `SdkConfig`, loaded
//! on first use and kept for the lifetime of the process. SDK retries are
//! disabled: each call either succeeds, is logged and skipped, or triggers the
//! caller's own fallback.

use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use tokio::sync::OnceCell;

static SHARED_CONFIG: OnceCell<SdkConfig> = OnceCell::const_new();

/// Load (once) and return the shared SDK configuration.
///
/// The region of the first caller wins; later calls return the cached config.
pub async fn shared_sdk_config(region: &str) -> &'static SdkConfig {
    SHARED_CONFIG
        .get_or_init(|| async {
            tracing::debug!(region = %region, "Loading AWS SDK configuration");
            load_sdk_config(region).await
        })
        .await
}

/// Load a fresh SDK configuration for the given region.
pub async fn load_sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .retry_config(RetryConfig::disabled())
        .load()
        .await
}
