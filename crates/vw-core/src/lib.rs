//! Video Window Core Library
//!
//! This crate provides the domain models, error types and configuration shared by
//! the feed-prefetch and upload-scan workers.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, LogFormat, PrefetchConfig, ScanEngineKind, ScanWorkerConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
