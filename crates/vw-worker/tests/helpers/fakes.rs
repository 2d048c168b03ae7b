//! In-memory stand-ins for the managed services.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use vw_core::models::{EngineVerdict, ScanVerdict};
use vw_core::{AppError, StorageBackend};
use vw_services::{
    CdnInvalidator, EdgeProbe, InvalidationRequest, ScanEngine, ScanError, VerdictPublisher,
};
use vw_storage::{Storage, StorageError, StorageResult};

#[derive(Default)]
pub struct FakeStorage {
    objects: Mutex<HashMap<(String, String), Bytes>>,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(self, bucket: &str, key: &str, data: &[u8]) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), Bytes::copy_from_slice(data));
        self
    }
}

#[async_trait]
impl Storage for FakeStorage {
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Bytes> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("{}/{}", bucket, key)))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Infected when the buffer contains `EICAR`, fails when it contains `CRASH`.
pub struct PatternScanner;

#[async_trait]
impl ScanEngine for PatternScanner {
    fn name(&self) -> &'static str {
        "pattern"
    }

    async fn scan(&self, data: &[u8]) -> Result<EngineVerdict, ScanError> {
        let contains = |needle: &[u8]| data.windows(needle.len()).any(|w| w == needle);
        if contains(b"CRASH") {
            Err(ScanError::Unavailable("connection refused".to_string()))
        } else if contains(b"EICAR") {
            Ok(EngineVerdict::infected("Eicar-Test-Signature"))
        } else {
            Ok(EngineVerdict::clean())
        }
    }
}

pub struct FailingScanner;

#[async_trait]
impl ScanEngine for FailingScanner {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn scan(&self, _data: &[u8]) -> Result<EngineVerdict, ScanError> {
        Err(ScanError::Timeout(30))
    }
}

/// Records successful publishes; the first `failures` attempts are rejected.
#[derive(Default)]
pub struct FakePublisher {
    published: Mutex<Vec<ScanVerdict>>,
    attempts: AtomicUsize,
    failures: AtomicUsize,
}

impl FakePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_first(failures: usize) -> Self {
        Self {
            failures: AtomicUsize::new(failures),
            ..Self::default()
        }
    }

    pub fn always_failing() -> Self {
        Self::failing_first(usize::MAX)
    }

    pub fn published(&self) -> Vec<ScanVerdict> {
        self.published.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VerdictPublisher for FakePublisher {
    async fn publish(&self, verdict: &ScanVerdict) -> Result<Option<String>, AppError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            if remaining != usize::MAX {
                self.failures.fetch_sub(1, Ordering::SeqCst);
            }
            return Err(AppError::Notification("topic unavailable".to_string()));
        }
        self.published.lock().unwrap().push(verdict.clone());
        Ok(Some(format!("msg-{}", attempt)))
    }
}

#[derive(Default)]
pub struct RecordingInvalidator {
    requests: Mutex<Vec<InvalidationRequest>>,
}

impl RecordingInvalidator {
    pub fn requests(&self) -> Vec<InvalidationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CdnInvalidator for RecordingInvalidator {
    async fn create_invalidation(
        &self,
        request: &InvalidationRequest,
    ) -> Result<Option<String>, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(Some("I2J0I21PCUYOIK".to_string()))
    }
}

#[derive(Default)]
pub struct FailingInvalidator {
    calls: AtomicUsize,
}

impl FailingInvalidator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CdnInvalidator for FailingInvalidator {
    async fn create_invalidation(
        &self,
        _request: &InvalidationRequest,
    ) -> Result<Option<String>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Cdn("TooManyInvalidationsInProgress".to_string()))
    }
}

/// Records probed URLs and the highest number of probes in flight at once.
#[derive(Default)]
pub struct FakeProbe {
    urls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeProbe {
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EdgeProbe for FakeProbe {
    async fn probe(&self, url: &str) -> Result<(), AppError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());

        tokio::time::sleep(Duration::from_millis(20)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if url.contains("missing") {
            return Err(AppError::Cdn(format!("404 for {}", url)));
        }
        Ok(())
    }
}
