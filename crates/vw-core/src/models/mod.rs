//! Data models for the workers
//!
//! Each sub-module represents one worker-facing payload: the trending feed,
//! scan verdicts, and storage notifications.

mod scan;
mod storage_event;
mod video;

// Re-export all models for convenient imports
pub use scan::{EngineVerdict, ScanStatus, ScanVerdict};
pub use storage_event::{BucketRef, ObjectRef, StorageEntity, StorageEvent, StorageEventRecord};
pub use video::{FeedPage, VideoRecord};
