use async_trait::async_trait;
use clamav_client::{clean, Tcp};
use std::str;
use std::time::{Duration, Instant};
use vw_core::models::EngineVerdict;

use super::scanner::{ScanEngine, ScanError};

/// ClamAV daemon scanner over TCP.
///
/// Every failure (connection, protocol, timeout) is returned as a [`ScanError`];
/// the caller decides how to treat an unscanned buffer.
#[derive(Clone, Debug)]
pub struct ClamAvScanner {
    host: String,
    port: u16,
    /// Timeout in seconds for each scan operation
    timeout_secs: u64,
}

impl ClamAvScanner {
    /// Create a new ClamAvScanner.
    ///
    /// # Arguments
    /// * `host` - ClamAV daemon hostname
    /// * `port` - ClamAV daemon port (typically 3310)
    /// * `timeout_secs` - Upper bound for one scan, connection included
    pub fn with_timeout(host: String, port: u16, timeout_secs: u64) -> Self {
        Self {
            host,
            port,
            timeout_secs,
        }
    }
}

/// Extract the signature name from a `stream: Eicar-Test-Signature FOUND` reply.
fn parse_virus_name(response: &[u8]) -> String {
    let response_str = match str::from_utf8(response) {
        Ok(s) => s.trim().trim_end_matches('\0'),
        Err(_) => return "unknown".to_string(),
    };
    if !response_str.contains("FOUND") {
        return "unknown".to_string();
    }
    response_str
        .split(':')
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or("unknown")
        .to_string()
}

#[async_trait]
impl ScanEngine for ClamAvScanner {
    fn name(&self) -> &'static str {
        "clamav"
    }

    /// Scan in-memory data using the sync API inside spawn_blocking.
    async fn scan(&self, data: &[u8]) -> Result<EngineVerdict, ScanError> {
        let start = Instant::now();
        tracing::debug!(host = %self.host, port = %self.port, "Starting ClamAV scan");
        let data = data.to_vec();
        let address = format!("{}:{}", self.host, self.port);

        let timeout_secs = self.timeout_secs;
        let result = tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            tokio::task::spawn_blocking(move || {
                let connection = Tcp {
                    host_address: address.as_str(),
                };
                let response_bytes = clamav_client::scan_buffer(data.as_slice(), connection, None)
                    .map_err(|e| ScanError::Unavailable(e.to_string()))?;
                let is_clean = clean(&response_bytes)
                    .map_err(|e| ScanError::InvalidResponse(e.to_string()))?;
                if is_clean {
                    Ok(EngineVerdict::clean())
                } else {
                    Ok(EngineVerdict::infected(parse_virus_name(&response_bytes)))
                }
            }),
        )
        .await;

        match result {
            Ok(Ok(Ok(verdict))) => {
                if verdict.is_infected {
                    tracing::warn!(
                        duration_ms = start.elapsed().as_millis(),
                        virus = ?verdict.virus_name,
                        "File scan detected virus"
                    );
                } else {
                    tracing::info!(
                        duration_ms = start.elapsed().as_millis(),
                        "File scan completed: clean"
                    );
                }
                Ok(verdict)
            }
            Ok(Ok(Err(e))) => {
                tracing::error!(error = %e, "ClamAV scan failed");
                Err(e)
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "ClamAV scan panicked");
                Err(ScanError::Task(e.to_string()))
            }
            Err(_) => {
                tracing::error!(timeout_secs, "ClamAV scan timeout");
                Err(ScanError::Timeout(timeout_secs))
            }
        }
    }
}
