use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::extractors::JsonBody;
use crate::gesture::LandmarkFrame;
use crate::response::{created, ok, AppError};
use crate::state::AppState;
use crate::store::operations::gestures::GestureSummary;
use crate::validation::{validate_gesture_name, validate_hands};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_recording))
        .route("/frame", post(record_frame))
        .route("/stop", post(stop_recording))
        .route("/cancel", post(cancel_recording))
        .route("/status", get(recording_status))
}

#[derive(Debug, Deserialize)]
struct StartRequest {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct FrameRequest {
    #[serde(default)]
    hands: Vec<LandmarkFrame>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StopResponse {
    frame_count: usize,
    gesture: GestureSummary,
}

async fn start_recording(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<StartRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_gesture_name(&req.name).map_err(|msg| AppError::bad_request("INVALID_NAME", msg))?;
    let status = state.engine().start_recording(&req.name)?;
    Ok(created(status))
}

async fn record_frame(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<FrameRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_hands(&req.hands).map_err(|msg| AppError::bad_request("MALFORMED_FRAME", &msg))?;
    let status = state.engine().record_frame(&req.hands)?;
    Ok(ok(status))
}

/// Stops the recording and trains from it. A recording that fails training
/// is discarded and the training error is returned.
async fn stop_recording(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stopped = state.engine().stop_recording()?;
    let template = stopped.result?;
    Ok(created(StopResponse {
        frame_count: stopped.frame_count,
        gesture: GestureSummary::from(&template),
    }))
}

async fn cancel_recording(State(state): State<AppState>) -> impl IntoResponse {
    let cancelled = state.engine().cancel_recording();
    ok(serde_json::json!({"cancelled": cancelled}))
}

async fn recording_status(State(state): State<AppState>) -> impl IntoResponse {
    ok(state.engine().recording_status())
}
