//! Scan verdict notifications.

use async_trait::async_trait;
use vw_core::models::ScanVerdict;
use vw_core::AppError;

/// Delivers one verdict message to the notification channel.
#[async_trait]
pub trait VerdictPublisher: Send + Sync {
    /// Publish the verdict, returning the channel's message id if reported.
    async fn publish(&self, verdict: &ScanVerdict) -> Result<Option<String>, AppError>;
}

#[cfg(feature = "sns")]
pub use aws::SnsPublisher;

#[cfg(feature = "sns")]
mod aws {
    use super::*;
    use aws_sdk_sns::error::DisplayErrorContext;
    use aws_sdk_sns::Client;

    /// SNS topic publisher.
    #[derive(Clone, Debug)]
    pub struct SnsPublisher {
        client: Client,
        topic_arn: String,
    }

    impl SnsPublisher {
        pub async fn new(region: &str, topic_arn: impl Into<String>) -> Self {
            let config = vw_infra::shared_sdk_config(region).await;
            Self::from_client(Client::new(config), topic_arn)
        }

        pub fn from_client(client: Client, topic_arn: impl Into<String>) -> Self {
            Self {
                client,
                topic_arn: topic_arn.into(),
            }
        }

        pub fn topic_arn(&self) -> &str {
            &self.topic_arn
        }
    }

    #[async_trait]
    impl VerdictPublisher for SnsPublisher {
        async fn publish(&self, verdict: &ScanVerdict) -> Result<Option<String>, AppError> {
            let message = serde_json::to_string(verdict)?;

            let output = self
                .client
                .publish()
                .topic_arn(&self.topic_arn)
                .message(message)
                .subject(verdict.subject())
                .send()
                .await
                .map_err(|e| AppError::Notification(DisplayErrorContext(&e).to_string()))?;

            Ok(output.message_id().map(str::to_string))
        }
    }
}
