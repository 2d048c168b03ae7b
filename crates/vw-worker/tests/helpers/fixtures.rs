use vw_core::models::VideoRecord;

pub fn video(id: &str, video_url: &str, manifest: Option<&str>) -> VideoRecord {
    VideoRecord {
        id: id.to_string(),
        video_url: video_url.to_string(),
        hls_manifest_url: manifest.map(str::to_string),
    }
}

/// JSON body of one feed page with `count` videos whose ids start at `first_id`.
pub fn feed_page_body(
    first_id: usize,
    count: usize,
    next_cursor: Option<&str>,
    has_more: bool,
) -> String {
    let videos: Vec<serde_json::Value> = (first_id..first_id + count)
        .map(|i| {
            serde_json::json!({
                "id": format!("v{}", i),
                "videoUrl": format!("https://media.video-window.com/videos/v{}.mp4", i),
                "hlsManifestUrl": format!("https://media.video-window.com/hls/v{}/master.m3u8", i),
            })
        })
        .collect();

    let mut page = serde_json::json!({ "videos": videos, "hasMore": has_more });
    if let Some(cursor) = next_cursor {
        page["nextCursor"] = serde_json::Value::String(cursor.to_string());
    }
    page.to_string()
}

/// An S3 "ObjectCreated" notification as delivered to the scan handler.
pub fn s3_notification(bucket: &str, key: &str, media_id: Option<&str>) -> serde_json::Value {
    let mut object = serde_json::json!({
        "key": key,
        "size": 1024,
        "eTag": "0123456789abcdef0123456789abcdef",
        "sequencer": "0A1B2C3D4E5F678901"
    });
    if let Some(id) = media_id {
        object["userMetadata"] = serde_json::json!({ "media-id": id });
    }

    serde_json::json!({
        "Records": [{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-1",
            "eventTime": "2026-03-01T12:30:05.000Z",
            "eventName": "ObjectCreated:Put",
            "s3": {
                "s3SchemaVersion": "1.0",
                "bucket": { "name": bucket, "arn": format!("arn:aws:s3:::{}", bucket) },
                "object": object
            }
        }]
    })
}
