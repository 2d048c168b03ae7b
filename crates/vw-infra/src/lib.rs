//! Video Window Infrastructure Library
//!
//! Shared infrastructure used by both workers:
//! - Telemetry initialization (tracing subscriber)
//! - Process-wide AWS SDK configuration

pub mod aws;
pub mod telemetry;

// Re-export commonly used types
pub use aws::shared_sdk_config;
pub use telemetry::{init_telemetry, shutdown_telemetry};
