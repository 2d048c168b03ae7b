//! Tracing initialization
//!
//! Lambda captures stdout, so both formats write there; JSON is the default
//! in production so log fields stay queryable.

mod init_basic;

pub use init_basic::{init_telemetry, shutdown_telemetry};
