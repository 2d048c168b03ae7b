//! Video Window Storage Library
//!
//! Read access to uploaded objects for the scan worker. Backends implement the
//! `Storage` trait; the S3 backend is used in production and the local
//! filesystem backend for development and tests.
//!
//! # Key format
//!
//! Storage notifications deliver object keys URL-encoded (`+` for spaces).
//! Backends always receive decoded keys; see [`keys::decode_event_key`].

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use vw_core::StorageBackend;
