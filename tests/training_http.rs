mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::app::spawn_test_server;
use common::fixtures::{hands_body, thumbs_up};
use common::http::{assert_json_error, call};

async fn push_frames(app: &axum::Router, count: usize) -> serde_json::Value {
    let mut last = json!(null);
    for _ in 0..count {
        let (status, body) = call(
            app,
            Method::POST,
            "/api/training/frame",
            Some(hands_body(&[thumbs_up()])),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        last = body;
    }
    last
}

#[tokio::test]
async fn it_record_then_stop_trains_gesture() {
    let app = spawn_test_server().await;

    let (status, body) = call(
        &app.app,
        Method::POST,
        "/api/training/start",
        Some(json!({ "name": "thumbs_up" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["recording"], true);
    assert_eq!(body["data"]["frameCount"], 0);

    let last = push_frames(&app.app, 15).await;
    assert_eq!(last["data"]["frameCount"], 15);
    assert_eq!(last["data"]["progress"], 50);
    assert_eq!(last["data"]["handDetected"], true);

    let (status, body) = call(&app.app, Method::POST, "/api/training/stop", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["frameCount"], 15);
    assert_eq!(body["data"]["gesture"]["name"], "thumbs_up");
    assert_eq!(app.state.store().count_gestures(), 1);

    let (_, body) = call(&app.app, Method::GET, "/api/training/status", None).await;
    assert_eq!(body["data"]["recording"], false);
}

#[tokio::test]
async fn it_ticks_without_hand_add_nothing() {
    let app = spawn_test_server().await;
    call(
        &app.app,
        Method::POST,
        "/api/training/start",
        Some(json!({ "name": "wave" })),
    )
    .await;
    push_frames(&app.app, 2).await;

    let (_, body) = call(
        &app.app,
        Method::POST,
        "/api/training/frame",
        Some(json!({ "hands": [] })),
    )
    .await;
    assert_eq!(body["data"]["frameCount"], 2);
    assert_eq!(body["data"]["handDetected"], false);
}

#[tokio::test]
async fn it_short_recording_is_rejected_and_discarded() {
    let app = spawn_test_server().await;
    call(
        &app.app,
        Method::POST,
        "/api/training/start",
        Some(json!({ "name": "tiny" })),
    )
    .await;
    push_frames(&app.app, 5).await;

    let (status, body) = call(&app.app, Method::POST, "/api/training/stop", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "TOO_FEW_FRAMES");
    assert_eq!(app.state.store().count_gestures(), 0);

    let (_, body) = call(&app.app, Method::GET, "/api/training/status", None).await;
    assert_eq!(body["data"]["recording"], false);
}

#[tokio::test]
async fn it_second_start_conflicts() {
    let app = spawn_test_server().await;
    call(
        &app.app,
        Method::POST,
        "/api/training/start",
        Some(json!({ "name": "one" })),
    )
    .await;

    let (status, body) = call(
        &app.app,
        Method::POST,
        "/api/training/start",
        Some(json!({ "name": "two" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_json_error(&body, "RECORDING_ACTIVE");
}

#[tokio::test]
async fn it_frame_and_stop_require_active_recording() {
    let app = spawn_test_server().await;

    let (status, body) = call(
        &app.app,
        Method::POST,
        "/api/training/frame",
        Some(hands_body(&[thumbs_up()])),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_json_error(&body, "NOT_RECORDING");

    let (status, body) = call(&app.app, Method::POST, "/api/training/stop", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_json_error(&body, "NOT_RECORDING");
}

#[tokio::test]
async fn it_start_requires_name() {
    let app = spawn_test_server().await;

    let (status, body) = call(
        &app.app,
        Method::POST,
        "/api/training/start",
        Some(json!({ "name": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "MISSING_NAME");
}

#[tokio::test]
async fn it_cancel_discards_recording() {
    let app = spawn_test_server().await;
    call(
        &app.app,
        Method::POST,
        "/api/training/start",
        Some(json!({ "name": "wave" })),
    )
    .await;
    push_frames(&app.app, 12).await;

    let (_, body) = call(&app.app, Method::POST, "/api/training/cancel", None).await;
    assert_eq!(body["data"]["cancelled"], true);
    assert_eq!(app.state.store().count_gestures(), 0);

    let (_, body) = call(&app.app, Method::POST, "/api/training/cancel", None).await;
    assert_eq!(body["data"]["cancelled"], false);
}
