mod helpers;

use helpers::fakes::{FailingScanner, FakePublisher, FakeStorage, PatternScanner};
use helpers::fixtures::s3_notification;
use std::sync::Arc;
use vw_core::models::{ScanStatus, StorageEvent, StorageEventRecord};
use vw_services::StubScanner;
use vw_storage::LocalStorage;
use vw_worker::{ScanReport, UploadScanner};

const BUCKET: &str = "video-window-uploads";

fn event(records: Vec<StorageEventRecord>) -> StorageEvent {
    StorageEvent { records }
}

fn pattern_scanner(storage: FakeStorage, publisher: &Arc<FakePublisher>) -> UploadScanner {
    UploadScanner::new(Arc::new(storage), Arc::new(PatternScanner), publisher.clone())
}

#[tokio::test]
async fn test_clean_upload_publishes_clean_verdict() {
    let storage =
        FakeStorage::new().with_object(BUCKET, "profile-media/3/temp/99_clip.mp4", b"video bytes");
    let publisher = Arc::new(FakePublisher::new());
    let scanner = pattern_scanner(storage, &publisher);

    let notification: StorageEvent = serde_json::from_value(s3_notification(
        BUCKET,
        "profile-media/3/temp/99_clip.mp4",
        Some("42"),
    ))
    .unwrap();
    let report = scanner.handle(&notification).await;

    assert_eq!(
        report,
        ScanReport {
            records: 1,
            published: 1,
            undelivered: 0
        }
    );
    let published = publisher.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].media_id, 42);
    assert_eq!(published[0].scan_result, ScanStatus::Clean);
    assert!(published[0].virus_name.is_none());
    assert!(published[0].scan_timestamp.ends_with('Z'));
}

#[tokio::test]
async fn test_infected_upload_carries_signature_name() {
    let storage =
        FakeStorage::new().with_object(BUCKET, "uploads/7_clip.mp4", b"X5O!P%@AP EICAR test");
    let publisher = Arc::new(FakePublisher::new());
    let scanner = pattern_scanner(storage, &publisher);

    scanner
        .handle(&event(vec![StorageEventRecord::new(BUCKET, "uploads/7_clip.mp4")]))
        .await;

    let published = publisher.published();
    assert_eq!(published[0].media_id, 7);
    assert_eq!(published[0].scan_result, ScanStatus::Infected);
    assert_eq!(published[0].virus_name.as_deref(), Some("Eicar-Test-Signature"));
}

#[tokio::test]
async fn test_scan_engine_failure_is_reported_infected() {
    let storage = FakeStorage::new().with_object(BUCKET, "uploads/clip.mp4", b"video bytes");
    let publisher = Arc::new(FakePublisher::new());
    let scanner =
        UploadScanner::new(Arc::new(storage), Arc::new(FailingScanner), publisher.clone());

    scanner
        .handle(&event(vec![StorageEventRecord::new(BUCKET, "uploads/clip.mp4")]))
        .await;

    let published = publisher.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].media_id, 0);
    assert_eq!(published[0].scan_result, ScanStatus::Infected);
    let virus_name = published[0].virus_name.as_deref().unwrap();
    assert!(virus_name.starts_with("Scan error: "));
    assert!(virus_name.contains("timed out"));
}

#[tokio::test]
async fn test_missing_object_is_reported_infected() {
    let publisher = Arc::new(FakePublisher::new());
    let scanner = UploadScanner::new(
        Arc::new(FakeStorage::new()),
        Arc::new(StubScanner),
        publisher.clone(),
    );

    scanner
        .handle(&event(vec![
            StorageEventRecord::new(BUCKET, "uploads/5_gone.mp4").with_metadata("media-id", "5")
        ]))
        .await;

    let published = publisher.published();
    assert_eq!(published[0].media_id, 5);
    assert_eq!(published[0].scan_result, ScanStatus::Infected);
    assert!(published[0]
        .virus_name
        .as_deref()
        .unwrap()
        .contains("File not found"));
}

#[tokio::test]
async fn test_one_verdict_per_record_whatever_fails() {
    let storage = FakeStorage::new()
        .with_object(BUCKET, "a/1_clean.mp4", b"fine")
        .with_object(BUCKET, "a/2_crash.mp4", b"CRASH")
        .with_object(BUCKET, "a/3_eicar.mp4", b"EICAR")
        .with_object(BUCKET, "a/no id.mp4", b"fine");
    let publisher = Arc::new(FakePublisher::new());
    let scanner = pattern_scanner(storage, &publisher);

    let records = vec![
        StorageEventRecord::new(BUCKET, "a/1_clean.mp4"),
        StorageEventRecord::new(BUCKET, "a/2_crash.mp4"),
        StorageEventRecord::new(BUCKET, "a/4_missing.mp4"),
        StorageEventRecord::new(BUCKET, "a/3_eicar.mp4"),
        StorageEventRecord::new(BUCKET, "a/no+id.mp4"),
    ];
    let report = scanner.handle(&event(records)).await;

    assert_eq!(report.records, 5);
    assert_eq!(report.published, 5);
    assert_eq!(report.undelivered, 0);

    let results: Vec<(i64, ScanStatus)> = publisher
        .published()
        .iter()
        .map(|v| (v.media_id, v.scan_result))
        .collect();
    assert_eq!(
        results,
        vec![
            (1, ScanStatus::Clean),
            (2, ScanStatus::Infected),
            (4, ScanStatus::Infected),
            (3, ScanStatus::Infected),
            (0, ScanStatus::Clean),
        ]
    );
}

#[tokio::test]
async fn test_failed_publish_is_replaced_by_scan_error_verdict() {
    let storage = FakeStorage::new().with_object(BUCKET, "uploads/8_clip.mp4", b"fine");
    let publisher = Arc::new(FakePublisher::failing_first(1));
    let scanner = pattern_scanner(storage, &publisher);

    let report = scanner
        .handle(&event(vec![StorageEventRecord::new(BUCKET, "uploads/8_clip.mp4")]))
        .await;

    assert_eq!(report.published, 1);
    assert_eq!(publisher.attempts(), 2);
    let published = publisher.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].media_id, 8);
    assert_eq!(published[0].scan_result, ScanStatus::Infected);
    assert!(published[0]
        .virus_name
        .as_deref()
        .unwrap()
        .contains("topic unavailable"));
}

#[tokio::test]
async fn test_undeliverable_verdicts_do_not_stop_processing() {
    let storage = FakeStorage::new()
        .with_object(BUCKET, "uploads/1_a.mp4", b"fine")
        .with_object(BUCKET, "uploads/2_b.mp4", b"fine");
    let publisher = Arc::new(FakePublisher::always_failing());
    let scanner = pattern_scanner(storage, &publisher);

    let report = scanner
        .handle(&event(vec![
            StorageEventRecord::new(BUCKET, "uploads/1_a.mp4"),
            StorageEventRecord::new(BUCKET, "uploads/2_b.mp4"),
        ]))
        .await;

    assert_eq!(
        report,
        ScanReport {
            records: 2,
            published: 0,
            undelivered: 2
        }
    );
    assert_eq!(publisher.attempts(), 4);
}

#[tokio::test]
async fn test_encoded_key_is_downloaded_decoded_from_local_storage() {
    let dir = tempfile::tempdir().unwrap();
    let object_dir = dir.path().join(BUCKET).join("profile-media");
    std::fs::create_dir_all(&object_dir).unwrap();
    std::fs::write(object_dir.join("12_my clip.mp4"), b"video bytes").unwrap();

    let storage = LocalStorage::new(dir.path()).await.unwrap();
    let publisher = Arc::new(FakePublisher::new());
    let scanner = UploadScanner::new(Arc::new(storage), Arc::new(StubScanner), publisher.clone());

    let notification: StorageEvent = serde_json::from_value(s3_notification(
        BUCKET,
        "profile-media/12_my+clip.mp4",
        None,
    ))
    .unwrap();
    scanner.handle(&notification).await;

    let published = publisher.published();
    assert_eq!(published[0].media_id, 12);
    assert_eq!(published[0].scan_result, ScanStatus::Clean);
}

#[tokio::test]
async fn test_empty_notification_publishes_nothing() {
    let publisher = Arc::new(FakePublisher::new());
    let scanner = UploadScanner::new(
        Arc::new(FakeStorage::new()),
        Arc::new(StubScanner),
        publisher.clone(),
    );

    let report = scanner.handle(&StorageEvent::default()).await;

    assert_eq!(report, ScanReport::default());
    assert_eq!(publisher.attempts(), 0);
}
