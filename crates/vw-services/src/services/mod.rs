#[cfg(feature = "clamav")]
pub mod clamav;
pub mod cloudfront;
pub mod edge;
pub mod feed;
pub mod scanner;
pub mod sns;
