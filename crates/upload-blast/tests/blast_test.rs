//! End-to-end test: blast a batch of uploads at an in-process upload-echo
//! server and check both sides of the exchange.

use std::sync::Arc;

use upload_blast::{run, send_upload, BlastConfig};
use upload_echo::testing::{CaptureSink, TestServer};
use upload_echo::{create_router, AppState, FILE_MARKER};

async fn start_echo_server() -> (TestServer, CaptureSink) {
    let sink = CaptureSink::new();
    let state = AppState::new(Arc::new(sink.clone()));
    let server = TestServer::start(create_router(state))
        .await
        .expect("failed to start echo server");
    (server, sink)
}

#[tokio::test]
async fn blast_delivers_every_upload() {
    let (server, sink) = start_echo_server().await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clean.dat");
    std::fs::write(&path, b"definitely not a virus").unwrap();

    let config = BlastConfig {
        url: format!("{}/scan", server.base_url()),
        field: "qqfile".to_string(),
        file: path,
        count: 3,
    };
    let report = run(&config).await.unwrap();

    assert_eq!(report.successes, 3);
    assert_eq!(report.failures, 0);

    let block = format!("{FILE_MARKER}\ndefinitely not a virus\n{FILE_MARKER}\n");
    assert_eq!(sink.contents_string(), block.repeat(3));
}

#[tokio::test]
async fn wrong_field_name_still_succeeds_but_echoes_nothing() {
    let (server, sink) = start_echo_server().await;

    let client = reqwest::Client::new();
    let status = send_upload(
        &client,
        &format!("{}/scan", server.base_url()),
        "not_qqfile",
        "clean.dat",
        b"invisible".to_vec(),
    )
    .await
    .unwrap();

    // The listener answers 200 either way; the content never reaches the
    // console because the field name does not match.
    assert!(status.is_success());
    assert_eq!(
        sink.contents_string(),
        format!("{FILE_MARKER}\n{FILE_MARKER}\n")
    );
}

#[tokio::test]
async fn unreachable_listener_counts_as_failures() {
    // Port from TcpListener bound and immediately dropped; nothing listens.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clean.dat");
    std::fs::write(&path, b"payload").unwrap();

    let config = BlastConfig {
        url: format!("http://{}/scan", addr),
        field: "qqfile".to_string(),
        file: path,
        count: 2,
    };
    let report = run(&config).await.unwrap();

    assert_eq!(report.successes, 0);
    assert_eq!(report.failures, 2);
}

#[tokio::test]
async fn missing_upload_file_is_fatal() {
    let config = BlastConfig {
        url: "http://localhost:6200/upload".to_string(),
        field: "qqfile".to_string(),
        file: "/definitely/not/a/real/file.dat".into(),
        count: 1,
    };
    let err = run(&config).await.unwrap_err();
    assert!(err.to_string().contains("Could not read upload file"));
}
