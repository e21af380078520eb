//! End-to-end exercises of the Axum router against both wire profiles,
//! driven through `tower::Service::oneshot` with no real socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mcp_runtime_server::dispatch::DispatchCore;
use mcp_runtime_server::session::SessionRegistry;
use mcp_runtime_server::ServerConfig;
use mcp_runtime_transport::{router, AppState, TransportConfig};
use mcp_wire_protocol::capabilities::ServerCapabilities;
use tower::ServiceExt;

fn test_state() -> AppState {
    let dispatch = Arc::new(DispatchCore::builder().with_utilities().build());
    let sessions = Arc::new(SessionRegistry::new(
        dispatch,
        ServerCapabilities::default(),
        ServerConfig::default(),
    ));
    AppState::new(
        sessions,
        ServerCapabilities::default(),
        ServerConfig::default(),
        TransportConfig::default(),
    )
}

fn initialize_body() -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2025-03-26",
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "1.0"},
        }
    })
    .to_string()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn initialize_without_a_session_id_mints_one_and_returns_it_on_the_wire() {
    let app = router(test_state());
    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "application/json")
        .body(Body::from(initialize_body()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("Mcp-Session-Id").is_some());
    let body = body_json(response).await;
    assert!(body["result"]["sessionId"].is_string());
}

#[tokio::test]
async fn request_with_no_session_id_and_not_a_sole_initialize_is_rejected() {
    let app = router(test_state());
    let ping = serde_json::json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(ping))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_session_id_is_404() {
    let app = router(test_state());
    let ping = serde_json::json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json")
        .header("Mcp-Session-Id", "does-not-exist")
        .body(Body::from(ping))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let app = router(test_state());
    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn a_notification_is_answered_with_202_and_no_body() {
    let state = test_state();
    let app = router(state.clone());

    let init_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ACCEPT, "application/json")
                .body(Body::from(initialize_body()))
                .unwrap(),
        )
        .await
        .unwrap();
    let session_id = init_response
        .headers()
        .get("Mcp-Session-Id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let notification =
        serde_json::json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .header("Mcp-Session-Id", session_id)
                .body(Body::from(notification))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn a_batch_gets_back_a_json_array_in_order() {
    let state = test_state();
    let app = router(state.clone());

    let init_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ACCEPT, "application/json")
                .body(Body::from(initialize_body()))
                .unwrap(),
        )
        .await
        .unwrap();
    let session_id = init_response
        .headers()
        .get("Mcp-Session-Id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let _ = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .header("Mcp-Session-Id", session_id.clone())
                .body(Body::from(
                    serde_json::json!({"jsonrpc": "2.0", "method": "notifications/initialized"})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    let batch = serde_json::json!([
        {"jsonrpc": "2.0", "id": 10, "method": "ping"},
        {"jsonrpc": "2.0", "id": 11, "method": "ping"},
    ])
    .to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ACCEPT, "application/json")
                .header("Mcp-Session-Id", session_id)
                .body(Body::from(batch))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let array = body.as_array().unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["id"], 10);
    assert_eq!(array[1]["id"], 11);
}

#[tokio::test]
async fn empty_batch_is_an_invalid_request() {
    let app = router(test_state());
    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("[]"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn method_not_found_is_a_200_with_a_jsonrpc_error_body() {
    let state = test_state();
    let app = router(state.clone());

    let init_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ACCEPT, "application/json")
                .body(Body::from(initialize_body()))
                .unwrap(),
        )
        .await
        .unwrap();
    let session_id = init_response
        .headers()
        .get("Mcp-Session-Id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let _ = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .header("Mcp-Session-Id", session_id.clone())
                .body(Body::from(
                    serde_json::json!({"jsonrpc": "2.0", "method": "notifications/initialized"})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    let request = serde_json::json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call"}).to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ACCEPT, "application/json")
                .header("Mcp-Session-Id", session_id)
                .body(Body::from(request))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn legacy_sse_handshake_mints_a_session_and_opens_a_stream() {
    let app = router(test_state());
    let request = Request::builder()
        .method("GET")
        .uri("/sse")
        .header(header::ACCEPT, "text/event-stream")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/event-stream"
    );
}

#[tokio::test]
async fn legacy_messages_post_is_always_202() {
    let state = test_state();
    let app = router(state.clone());

    let sse_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/sse")
                .header(header::ACCEPT, "text/event-stream")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(sse_response.status(), StatusCode::OK);
    let session_id = sse_response
        .headers()
        .get("Mcp-Session-Id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let ping = serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}).to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/messages?sessionId={session_id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(ping))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn payload_over_the_size_ceiling_is_rejected() {
    let mut config = ServerConfig::default();
    config.limits.max_message_size = 16;
    let dispatch = Arc::new(DispatchCore::builder().with_utilities().build());
    let sessions = Arc::new(SessionRegistry::new(
        dispatch,
        ServerCapabilities::default(),
        config.clone(),
    ));
    let state = AppState::new(sessions, ServerCapabilities::default(), config, TransportConfig::default());
    let app = router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(initialize_body()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
