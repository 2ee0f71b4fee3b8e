mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};

use common::app::spawn_test_server;
use common::http::{call, raw_request, request, response_json};

#[tokio::test]
async fn it_health_live_and_ready() {
    let app = spawn_test_server().await;

    let live = request(&app.app, Method::GET, "/health/live", None).await;
    assert_eq!(live.status(), StatusCode::OK);

    let ready = request(&app.app, Method::GET, "/health/ready", None).await;
    assert_eq!(ready.status(), StatusCode::OK);
}

#[tokio::test]
async fn it_health_reports_library_size() {
    let app = spawn_test_server().await;

    let (status, body) = call(&app.app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["gestures"], 0);
}

#[tokio::test]
async fn it_health_database_is_ok() {
    let app = spawn_test_server().await;

    let (status, body) = call(&app.app, Method::GET, "/health/database", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["healthy"], true);
    assert_eq!(body["gestureCount"], 0);
}

#[tokio::test]
async fn it_unknown_route_is_json_404_with_trace_id() {
    let app = spawn_test_server().await;

    let resp = request(&app.app, Method::GET, "/api/nope", None).await;
    let (status, headers, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("request id header");
    assert_eq!(body["traceId"], request_id);
}

#[tokio::test]
async fn it_client_request_id_is_echoed() {
    let app = spawn_test_server().await;

    let req = Request::builder()
        .method(Method::GET)
        .uri("/health/live")
        .header("x-request-id", "client-abc_123")
        .body(Body::empty())
        .unwrap();
    let resp = raw_request(&app.app, req).await;
    assert_eq!(resp.headers()["x-request-id"], "client-abc_123");
}
