//! Video Window Services Layer
//!
//! Thin clients for every external system the workers talk to. Each managed
//! service sits behind a capability trait so the worker pipelines can run
//! against in-memory fakes:
//!
//! - [`FeedClient`]: trending feed HTTP API
//! - [`CdnInvalidator`]: bulk cache invalidation (CloudFront)
//! - [`EdgeProbe`]: existence probes against the CDN edge
//! - [`VerdictPublisher`]: scan verdict notifications (SNS)
//! - [`ScanEngine`]: malware scanning of an in-memory buffer

pub mod services;

#[cfg(feature = "clamav")]
pub use services::clamav::ClamAvScanner;
#[cfg(feature = "cloudfront")]
pub use services::cloudfront::CloudFrontInvalidator;
pub use services::cloudfront::{CdnInvalidator, InvalidationRequest};
pub use services::edge::{EdgeProbe, HttpEdgeProbe};
pub use services::feed::FeedClient;
pub use services::scanner::{create_scan_engine, ScanEngine, ScanError, StubScanner};
#[cfg(feature = "sns")]
pub use services::sns::SnsPublisher;
pub use services::sns::VerdictPublisher;
