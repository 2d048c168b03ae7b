//! Bulk cache invalidation.

use async_trait::async_trait;
use vw_core::AppError;

/// One bulk invalidation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationRequest {
    pub distribution_id: String,
    pub paths: Vec<String>,
    /// Idempotency token; the CDN treats repeated references as the same request.
    pub caller_reference: String,
}

/// CDN control API capable of purging cached paths.
#[async_trait]
pub trait CdnInvalidator: Send + Sync {
    /// Submit the request, returning the invalidation id when the API reports one.
    async fn create_invalidation(
        &self,
        request: &InvalidationRequest,
    ) -> Result<Option<String>, AppError>;
}

#[cfg(feature = "cloudfront")]
pub use aws::CloudFrontInvalidator;

#[cfg(feature = "cloudfront")]
mod aws {
    use super::*;
    use aws_sdk_cloudfront::error::DisplayErrorContext;
    use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};
    use aws_sdk_cloudfront::Client;

    /// CloudFront `CreateInvalidation` client.
    #[derive(Clone, Debug)]
    pub struct CloudFrontInvalidator {
        client: Client,
    }

    impl CloudFrontInvalidator {
        pub async fn new(region: &str) -> Self {
            let config = vw_infra::shared_sdk_config(region).await;
            Self::from_client(Client::new(config))
        }

        pub fn from_client(client: Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl CdnInvalidator for CloudFrontInvalidator {
        async fn create_invalidation(
            &self,
            request: &InvalidationRequest,
        ) -> Result<Option<String>, AppError> {
            let paths = Paths::builder()
                .quantity(request.paths.len() as i32)
                .set_items(Some(request.paths.clone()))
                .build()
                .map_err(|e| AppError::InvalidInput(format!("Invalid invalidation paths: {}", e)))?;

            let batch = InvalidationBatch::builder()
                .paths(paths)
                .caller_reference(request.caller_reference.clone())
                .build()
                .map_err(|e| AppError::InvalidInput(format!("Invalid invalidation batch: {}", e)))?;

            let output = self
                .client
                .create_invalidation()
                .distribution_id(request.distribution_id.clone())
                .invalidation_batch(batch)
                .send()
                .await
                .map_err(|e| AppError::Cdn(DisplayErrorContext(&e).to_string()))?;

            Ok(output.invalidation().map(|inv| inv.id().to_string()))
        }
    }
}
