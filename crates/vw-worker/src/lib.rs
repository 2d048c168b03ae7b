//! Video Window background workers
//!
//! Two short-lived pipelines, each driven by one Lambda binary:
//!
//! - [`prefetch`]: page through the trending feed and refresh the CDN for the
//!   videos it returns, falling back to edge probes when invalidation fails.
//! - [`scan`]: scan every uploaded object named by a storage notification and
//!   publish exactly one verdict per object.

mod logging;
pub mod prefetch;
pub mod scan;

pub use prefetch::{FeedPrefetchWorker, PrefetchReport};
pub use scan::{ScanReport, UploadScanner};
