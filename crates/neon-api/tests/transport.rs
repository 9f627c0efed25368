//! Tests for the default reqwest transport and request composition

use std::sync::Arc;
use std::time::Duration;

use neon_api::testing::RecordingTransport;
use neon_api::{
    ClientConfig, HttpTransport, NeonApi, NeonClient, NeonError, ReqwestTransport, USER_AGENT,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ----------------------------------------------------------------------------
// ReqwestTransport
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_reqwest_transport_sends_headers_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/projects"))
        .and(header("Authorization", "Bearer napi_abc"))
        .and(header("Content-Type", "application/json"))
        .and(header("User-Agent", USER_AGENT))
        .and(body_string(r#"{"project":{"name":"demo"}}"#))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("x-neon-ret-request-id", "req-1")
                .set_body_json(json!({"ok": true})),
        )
        .mount(&server)
        .await;

    let api = NeonApi::with_timeout(
        ClientConfig::new("napi_abc").with_base_url(format!("{}/api/v2", server.uri())),
        Duration::from_secs(5),
    )
    .unwrap();

    let request = api
        .build_request(reqwest::Method::POST, "projects")
        .with_body(br#"{"project":{"name":"demo"}}"#.to_vec());
    let response = api.send(request).await.unwrap();

    assert_eq!(response.status(), 201);
    assert_eq!(response.header("X-Neon-Ret-Request-Id"), Some("req-1"));
    assert_eq!(api.decode(response).unwrap(), json!({"ok": true}));
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    // Nothing listens on port 9 locally
    let client = NeonClient::with_config(
        ClientConfig::new("napi_abc").with_base_url("http://127.0.0.1:9/api/v2/"),
        Duration::from_secs(2),
    )
    .unwrap();

    let err = client.regions().list().await.unwrap_err();

    match &err {
        NeonError::Request { request, .. } => {
            assert_eq!(request.url(), "http://127.0.0.1:9/api/v2/regions");
            assert_eq!(request.method(), &reqwest::Method::GET);
        }
        other => panic!("expected request error, got {other:?}"),
    }
    assert_eq!(err.status(), None);
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_custom_reqwest_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::from_client(reqwest::Client::new());
    let request = neon_api::ApiRequest::new(reqwest::Method::GET, format!("{}/ping", server.uri()));
    let response = transport.send(&request).await.unwrap();

    assert_eq!(response.text(), "pong");
}

// ----------------------------------------------------------------------------
// Request composition with an in-memory transport
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_request_composition() {
    let transport = Arc::new(RecordingTransport::new().respond(200, json!({"regions": []})));
    let client = NeonClient::with_transport(
        ClientConfig::new("napi_xyz")
            .with_base_url("https://neon.internal/api/v2")
            .with_user_agent("my-tool/1.0"),
        transport.clone(),
    );

    let regions = client.regions().list().await.unwrap();
    assert!(regions.is_empty());

    let request = transport.last_request().unwrap();
    assert_eq!(request.method(), &reqwest::Method::GET);
    assert_eq!(request.url(), "https://neon.internal/api/v2/regions");
    assert_eq!(request.header("authorization"), Some("Bearer napi_xyz"));
    assert_eq!(request.header("accept"), Some("application/json"));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.header("user-agent"), Some("my-tool/1.0"));
    assert!(request.body().is_none());
}

#[tokio::test]
async fn test_path_segments_are_encoded() {
    let transport = Arc::new(RecordingTransport::new().respond(
        200,
        json!({"role": {
            "branch_id": "br/1",
            "name": "user name",
            "created_at": "2024-03-01T12:00:00Z",
            "updated_at": "2024-03-01T12:00:00Z"
        }}),
    ));
    let client = NeonClient::with_transport(ClientConfig::new("k"), transport.clone());

    client.roles().get("p 1", "br/1", "user name").await.unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(
        request.url(),
        "https://console.neon.tech/api/v2/projects/p%201/branches/br%2F1/roles/user%20name"
    );
}

#[tokio::test]
async fn test_empty_success_body_is_decode_error() {
    let transport = Arc::new(RecordingTransport::new());
    transport.push(neon_api::ApiResponse::new(200, Vec::new()));
    let client = NeonClient::with_transport(ClientConfig::new("k"), transport);

    let err = client.regions().list().await.unwrap_err();

    assert!(err.is_decode());
}

#[tokio::test]
async fn test_missing_envelope_key_is_decode_error() {
    let transport = Arc::new(RecordingTransport::new().respond(200, json!({"unexpected": []})));
    let client = NeonClient::with_transport(ClientConfig::new("k"), transport);

    let err = client.projects().get("p-1").await.unwrap_err();

    assert!(err.is_decode());
    assert!(err.to_string().contains("project"));
}
