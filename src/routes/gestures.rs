use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::extractors::JsonBody;
use crate::gesture::training::training_progress;
use crate::gesture::LandmarkFrame;
use crate::response::{created, ok, AppError};
use crate::state::AppState;
use crate::store::operations::gestures::{GestureDataset, GestureSummary};
use crate::validation::{validate_frames, validate_gesture_name};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_gestures).post(train_gesture).delete(delete_all))
        .route("/export", get(export_gestures))
        .route("/import", post(import_gestures))
        .route("/index/:index", delete(delete_at_index))
        .route("/:id", delete(delete_gesture))
        .route("/:id/template", get(get_template))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrainRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    frames: Vec<LandmarkFrame>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrainedGesture {
    #[serde(flatten)]
    summary: GestureSummary,
    progress: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateView {
    id: String,
    name: String,
    frame_count: usize,
    /// Averaged wrist-relative landmarks; absent when the capture is empty.
    reference: Option<LandmarkFrame>,
}

async fn list_gestures(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = state.store().list_gesture_summaries()?;
    Ok(ok(items))
}

async fn train_gesture(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TrainRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_gesture_name(&req.name).map_err(|msg| AppError::bad_request("INVALID_NAME", msg))?;
    validate_frames(&req.frames).map_err(|msg| AppError::bad_request("MALFORMED_FRAME", &msg))?;

    let engine = state.engine();
    let recommended = engine.get_config().recommended_training_frames;
    let template = engine.train(&req.name, req.frames)?;
    let summary = GestureSummary::from(&template);
    let progress = training_progress(summary.frame_count, recommended);
    Ok(created(TrainedGesture { summary, progress }))
}

async fn delete_gesture(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.engine().delete_gesture(&id)? {
        return Err(AppError::not_found("Gesture not found"));
    }
    Ok(ok(serde_json::json!({"deleted": true, "id": id})))
}

async fn delete_at_index(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state.engine().delete_gesture_at(index)?;
    Ok(ok(GestureSummary::from(&removed)))
}

async fn delete_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let deleted = state.engine().delete_all()?;
    Ok(ok(serde_json::json!({"deleted": deleted})))
}

async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (template, prepared) = state
        .engine()
        .template_for(&id)?
        .ok_or_else(|| AppError::not_found("Gesture not found"))?;
    Ok(ok(TemplateView {
        id: template.id,
        name: template.name,
        frame_count: template.frames.len(),
        reference: prepared.map(|p| p.reference),
    }))
}

/// The bare dataset array, importable as-is.
async fn export_gestures(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let datasets = state.store().export_gestures()?;
    tracing::info!(count = datasets.len(), "Gestures exported");
    Ok(Json(datasets))
}

async fn import_gestures(
    State(state): State<AppState>,
    JsonBody(datasets): JsonBody<Vec<GestureDataset>>,
) -> Result<impl IntoResponse, AppError> {
    for (i, dataset) in datasets.iter().enumerate() {
        validate_gesture_name(&dataset.name)
            .map_err(|msg| AppError::bad_request("INVALID_NAME", &format!("Dataset {i}: {msg}")))?;
        validate_frames(&dataset.frames).map_err(|msg| {
            AppError::bad_request("MALFORMED_FRAME", &format!("Dataset {i}: {msg}"))
        })?;
    }

    let imported = state.engine().import(datasets)?;
    let items: Vec<GestureSummary> = imported.iter().map(GestureSummary::from).collect();
    Ok(created(items))
}
