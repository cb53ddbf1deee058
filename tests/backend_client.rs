//! Integration tests for BackendClient and its session check.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use story_service::backend::{spawn_session_probe, BackendClient};
use story_service::config::BackendConfig;
use story_service::error::AppError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(mock_server: &MockServer) -> BackendClient {
    BackendClient::new(BackendConfig::from_values(
        Some(mock_server.uri()),
        Some("test-anon-key".into()),
    ))
}

#[test]
fn test_construction_with_placeholders_does_no_io() {
    let client = BackendClient::new(BackendConfig::from_values(None, None));
    assert_eq!(client.config().url, "https://example.supabase.co");
    assert_eq!(client.config().anon_key, "example-anon-key");
}

#[test]
fn test_shared_client_is_a_singleton() {
    assert!(Arc::ptr_eq(&BackendClient::shared(), &BackendClient::shared()));
}

#[tokio::test]
async fn test_get_session_sends_key_headers() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/health"))
        .and(header("apikey", "test-anon-key"))
        .and(header("authorization", "Bearer test-anon-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "GoTrue", "version": "v2.150.0"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = client_for(&mock_server).get_session().await.expect("session");
    assert_eq!(state.name.as_deref(), Some("GoTrue"));
    assert_eq!(state.version.as_deref(), Some("v2.150.0"));
}

#[tokio::test]
async fn test_get_session_accepts_empty_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let state = client_for(&mock_server).get_session().await.expect("session");
    assert!(state.version.is_none());
}

#[tokio::test]
async fn test_get_session_failure_is_backend_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/health"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).get_session().await;
    assert!(matches!(result, Err(AppError::BackendError(_))));
}

#[tokio::test]
async fn test_session_check_reports_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "v2"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Arc::new(client_for(&mock_server));
    let ok = spawn_session_probe(Arc::clone(&client)).await.expect("session check task");
    assert!(ok);
}

#[tokio::test]
async fn test_session_check_swallows_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    assert!(!client_for(&mock_server).probe_session().await);
}

#[tokio::test]
async fn test_session_check_swallows_unreachable_backend() {
    let client = BackendClient::new(BackendConfig::from_values(
        Some("http://127.0.0.1:1".into()),
        None,
    ));
    assert!(!client.probe_session().await);
}

#[tokio::test]
async fn test_hung_backend_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).with_request_timeout(Duration::from_millis(200));
    let started = Instant::now();
    let result = client.get_session().await;

    assert!(matches!(result, Err(AppError::BackendError(_))));
    assert!(started.elapsed() < Duration::from_secs(4));
}
