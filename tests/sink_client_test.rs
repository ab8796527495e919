//! Integration tests for the HTTP collaborator clients, against a mock
//! server.

use clipforge::config::{ArchiveConfig, CourierConfig, LedgerConfig};
use clipforge::distribute::DistributionRecord;
use clipforge::sinks::{ArchiveStore, HttpArchive, HttpCourier, HttpLedger, Notifier, RecordSink};
use wiremock::matchers::{body_json_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_artifact(dir: &std::path::Path) -> std::path::PathBuf {
    let artifact = dir.join("warm_25fps_j1.mp4");
    std::fs::write(&artifact, b"rendition-bytes").unwrap();
    artifact
}

fn sample_record(channel: &str) -> DistributionRecord {
    DistributionRecord {
        job_id: "j1".to_string(),
        variant_label: "Warm LUT + 25fps + 1.1x".to_string(),
        date: "2026-08-05".to_string(),
        archive_link: "https://archive.test/warm_25fps_j1.mp4".to_string(),
        title: "Auto rendition".to_string(),
        note: String::new(),
        tags: vec!["auto".to_string()],
        profile: "default".to_string(),
        target_channel: channel.to_string(),
        status: "done".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Courier
// ---------------------------------------------------------------------------

#[tokio::test]
async fn courier_delivers_video_with_caption() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jobs/j1/video"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = sample_artifact(dir.path());

    let courier = HttpCourier::new(&CourierConfig {
        url: server.uri(),
        token: "t0k".to_string(),
    });

    courier
        .send_video("j1", &artifact, "Warm LUT + 25fps + 1.1x")
        .await
        .unwrap();
}

#[tokio::test]
async fn courier_surfaces_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jobs/j1/video"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = sample_artifact(dir.path());

    let courier = HttpCourier::new(&CourierConfig {
        url: server.uri(),
        token: String::new(),
    });

    let err = courier.send_video("j1", &artifact, "caption").await.unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn courier_delivers_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jobs/j9/notice"))
        .and(body_json_string(
            r#"{"text":"Warm LUT + 25fps + 1.1x not created: transcoder failed"}"#,
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let courier = HttpCourier::new(&CourierConfig {
        url: server.uri(),
        token: String::new(),
    });

    courier
        .send_notice("j9", "Warm LUT + 25fps + 1.1x not created: transcoder failed")
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Archive
// ---------------------------------------------------------------------------

#[tokio::test]
async fn archive_upload_returns_durable_link() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "link": "https://archive.test/files/abc123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = sample_artifact(dir.path());

    let archive = HttpArchive::new(&ArchiveConfig {
        url: server.uri(),
        token: "t0k".to_string(),
        collection: "clipforge".to_string(),
    });

    let link = archive.upload(&artifact, "warm_25fps_j1.mp4").await.unwrap();
    assert_eq!(link, "https://archive.test/files/abc123");
}

#[tokio::test]
async fn archive_upload_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(403).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = sample_artifact(dir.path());

    let archive = HttpArchive::new(&ArchiveConfig {
        url: server.uri(),
        token: String::new(),
        collection: "clipforge".to_string(),
    });

    let err = archive
        .upload(&artifact, "warm_25fps_j1.mp4")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn archive_empty_link_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "link": "" })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = sample_artifact(dir.path());

    let archive = HttpArchive::new(&ArchiveConfig {
        url: server.uri(),
        token: String::new(),
        collection: "clipforge".to_string(),
    });

    assert!(archive.upload(&artifact, "x.mp4").await.is_err());
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ledger_appends_one_row_per_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tables/distribution/rows"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let ledger = HttpLedger::new(&LedgerConfig {
        url: server.uri(),
        token: "t0k".to_string(),
        table: "distribution".to_string(),
    });

    ledger.append_row(&sample_record("insta")).await.unwrap();
    ledger.append_row(&sample_record("shorts")).await.unwrap();
}

#[tokio::test]
async fn ledger_rejection_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tables/distribution/rows"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let ledger = HttpLedger::new(&LedgerConfig {
        url: server.uri(),
        token: String::new(),
        table: "distribution".to_string(),
    });

    assert!(ledger.append_row(&sample_record("insta")).await.is_err());
}
