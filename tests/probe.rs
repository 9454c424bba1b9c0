//! Liveness probe client tests.

use course_graph_api::config::ServiceConfig;
use course_graph_api::health::probe::{probe, ProbeError};
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_probe_live_server() {
    let mut config = ServiceConfig::default();
    config.app.env = "ci".into();
    let server = common::spawn_server(config).await;

    let report = probe(&common::client(), &server.base_url()).await.expect("probe failed");
    assert!(report.is_ok());
    assert_eq!(report.service, "course-graph-api");
    assert_eq!(report.env, "ci");
    assert_eq!(report.version, env!("CARGO_PKG_VERSION"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_probe_tolerates_trailing_slash() {
    let server = common::spawn_server(ServiceConfig::default()).await;

    let url = format!("{}/", server.base_url());
    assert!(probe(&common::client(), &url).await.is_ok());

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_probe_reports_error_status() {
    let addr = common::start_programmable_backend(|| async {
        (503, "{\"detail\":\"down\"}".to_string())
    })
    .await;

    let err = probe(&common::client(), &format!("http://{}", addr)).await.unwrap_err();
    assert!(matches!(err, ProbeError::Status(StatusCode::SERVICE_UNAVAILABLE)));
}

#[tokio::test]
async fn test_probe_reports_unhealthy_status() {
    let addr = common::start_programmable_backend(|| async {
        (
            200,
            r#"{"status":"degraded","service":"course-graph-api","env":"local","version":"0.1.0"}"#
                .to_string(),
        )
    })
    .await;

    let err = probe(&common::client(), &format!("http://{}", addr)).await.unwrap_err();
    assert!(matches!(err, ProbeError::Unhealthy(ref s) if s == "degraded"));
}

#[tokio::test]
async fn test_probe_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = probe(&common::client(), &format!("http://{}", addr)).await.unwrap_err();
    assert!(matches!(err, ProbeError::Request(_)));
}
