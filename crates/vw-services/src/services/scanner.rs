//! Pluggable scanning engines.

use async_trait::async_trait;
use std::sync::Arc;
use vw_core::models::EngineVerdict;
use vw_core::{AppError, ScanEngineKind, ScanWorkerConfig};

/// Reasons a buffer could not be scanned.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("scan engine unavailable: {0}")]
    Unavailable(String),

    #[error("scan timed out after {0} seconds")]
    Timeout(u64),

    #[error("unexpected scan engine response: {0}")]
    InvalidResponse(String),

    #[error("scan task failed: {0}")]
    Task(String),
}

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        AppError::Scan(err.to_string())
    }
}

/// Capability: scan an in-memory buffer for malware.
#[async_trait]
pub trait ScanEngine: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &'static str;

    async fn scan(&self, data: &[u8]) -> Result<EngineVerdict, ScanError>;
}

/// Placeholder engine: every buffer is clean.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubScanner;

#[async_trait]
impl ScanEngine for StubScanner {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn scan(&self, data: &[u8]) -> Result<EngineVerdict, ScanError> {
        tracing::info!(size_bytes = data.len(), "Scanning buffer (stub engine)");
        Ok(EngineVerdict::clean())
    }
}

/// Create the scanning engine selected by configuration
pub fn create_scan_engine(config: &ScanWorkerConfig) -> Result<Arc<dyn ScanEngine>, AppError> {
    match config.scan_engine {
        ScanEngineKind::Stub => Ok(Arc::new(StubScanner)),

        #[cfg(feature = "clamav")]
        ScanEngineKind::ClamAv => Ok(Arc::new(crate::ClamAvScanner::with_timeout(
            config.clamav_host.clone(),
            config.clamav_port,
            config.clamav_timeout_secs,
        ))),

        #[cfg(not(feature = "clamav"))]
        ScanEngineKind::ClamAv => Err(AppError::Config(
            "ClamAV engine not available (clamav feature not enabled)".to_string(),
        )),
    }
}
