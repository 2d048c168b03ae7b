//! Upload virus scanning.
//!
//! Every record of a storage notification is downloaded, scanned and answered
//! with exactly one verdict message. Anything that prevents a genuine verdict
//! is reported as infected.

use anyhow::{Context, Result};
use chrono::Utc;
use regex::Regex;
use serde::Serialize;
use std::sync::{Arc, LazyLock};
use vw_core::constants::{MEDIA_ID_METADATA_KEY, UNKNOWN_MEDIA_ID};
use vw_core::models::{EngineVerdict, ScanVerdict, StorageEvent, StorageEventRecord};
use vw_core::Config;
use vw_services::{create_scan_engine, ScanEngine, ScanError, SnsPublisher, VerdictPublisher};
use vw_storage::keys::{decode_event_key, file_name};
use vw_storage::{create_storage, Storage, StorageError};

use crate::logging::log_error;

static FILE_NAME_MEDIA_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)_").expect("media id pattern is valid"));

/// Counts for one notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub records: usize,
    pub published: usize,
    pub undelivered: usize,
}

#[derive(Debug, thiserror::Error)]
enum RecordError {
    #[error(transparent)]
    Download(#[from] StorageError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Optionally signed leading decimal digits of `value`, the way `parseInt`
/// reads them: `"42abc"` is 42, `"-5"` is -5, `"+5"` is 5.
fn leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let sign_len = trimmed.len() - unsigned.len();
    let digits_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_len == 0 {
        return None;
    }
    trimmed[..sign_len + digits_len].parse().ok()
}

/// Correlation id of the uploaded media.
///
/// Looked up in order: the `media-id` user metadata, a `{digits}_` prefix of
/// the object's file name, then [`UNKNOWN_MEDIA_ID`].
pub fn resolve_media_id(record: &StorageEventRecord) -> i64 {
    if let Some(id) = record.metadata(MEDIA_ID_METADATA_KEY).and_then(leading_integer) {
        return id;
    }

    let key = decode_event_key(record.key());
    if let Some(id) = FILE_NAME_MEDIA_ID
        .captures(file_name(&key))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
    {
        return id;
    }

    tracing::warn!(key = %record.key(), "No media id in metadata or file name, using 0");
    UNKNOWN_MEDIA_ID
}

pub struct UploadScanner {
    storage: Arc<dyn Storage>,
    engine: Arc<dyn ScanEngine>,
    publisher: Arc<dyn VerdictPublisher>,
}

impl UploadScanner {
    pub fn new(
        storage: Arc<dyn Storage>,
        engine: Arc<dyn ScanEngine>,
        publisher: Arc<dyn VerdictPublisher>,
    ) -> Self {
        Self {
            storage,
            engine,
            publisher,
        }
    }

    /// Build the scanner with the configured storage backend, engine and SNS topic.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let storage = create_storage(config)
            .await
            .context("Failed to initialize storage backend")?;
        let engine = create_scan_engine(&config.scan).context("Failed to create scan engine")?;
        let publisher =
            SnsPublisher::new(&config.base.aws_region, config.scan.sns_topic_arn.clone()).await;

        tracing::info!(
            storage = %storage.backend_type(),
            engine = engine.name(),
            topic = %publisher.topic_arn(),
            "Upload scanner initialized"
        );

        Ok(Self::new(storage, engine, Arc::new(publisher)))
    }

    /// Process every record in order. Never fails; per-record problems end up
    /// in the published verdicts and the report.
    #[tracing::instrument(skip_all, fields(records = event.records.len()))]
    pub async fn handle(&self, event: &StorageEvent) -> ScanReport {
        let mut report = ScanReport {
            records: event.records.len(),
            ..ScanReport::default()
        };

        for record in &event.records {
            if self.process_record(record).await {
                report.published += 1;
            } else {
                report.undelivered += 1;
            }
        }

        tracing::info!(
            records = report.records,
            published = report.published,
            undelivered = report.undelivered,
            "Scan notification processed"
        );
        report
    }

    /// Returns whether a verdict for the record was delivered.
    async fn process_record(&self, record: &StorageEventRecord) -> bool {
        let media_id = resolve_media_id(record);
        let key = decode_event_key(record.key());

        let verdict = match self.scan_object(record.bucket(), &key).await {
            Ok(engine_verdict) => ScanVerdict::from_engine(media_id, engine_verdict, Utc::now()),
            Err(e) => {
                tracing::error!(
                    media_id,
                    bucket = %record.bucket(),
                    key = %key,
                    error = %e,
                    "Scan failed, reporting upload as infected"
                );
                ScanVerdict::scan_error(media_id, &e, Utc::now())
            }
        };

        self.deliver(verdict).await
    }

    async fn scan_object(&self, bucket: &str, key: &str) -> Result<EngineVerdict, RecordError> {
        let data = self.storage.download(bucket, key).await?;
        tracing::debug!(bucket = %bucket, key = %key, size_bytes = data.len(), "Downloaded upload");
        Ok(self.engine.scan(&data).await?)
    }

    async fn deliver(&self, verdict: ScanVerdict) -> bool {
        let err = match self.publisher.publish(&verdict).await {
            Ok(message_id) => {
                tracing::info!(
                    media_id = verdict.media_id,
                    result = %verdict.scan_result,
                    message_id = ?message_id,
                    "Scan verdict published"
                );
                return true;
            }
            Err(e) => e,
        };

        log_error(&err, "publish_verdict");
        tracing::warn!(
            media_id = verdict.media_id,
            "Verdict publish failed, publishing scan error instead"
        );
        let fallback = ScanVerdict::scan_error(verdict.media_id, &err, Utc::now());
        match self.publisher.publish(&fallback).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(
                    media_id = verdict.media_id,
                    error = %e,
                    "Scan verdict could not be delivered"
                );
                false
            }
        }
    }
}
