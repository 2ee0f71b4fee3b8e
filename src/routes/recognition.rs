use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::extractors::JsonBody;
use crate::gesture::{LandmarkFrame, MatcherConfig};
use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::validation::validate_hands;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recognize", post(recognize))
        .route("/scores", post(scores))
        .route("/session", get(get_session))
        .route("/session/reset", post(reset_session))
        .route("/config", get(get_config).put(update_config))
}

/// Hands the landmark source reported for one video frame.
#[derive(Debug, Deserialize)]
struct HandsRequest {
    #[serde(default)]
    hands: Vec<LandmarkFrame>,
}

impl HandsRequest {
    fn validated(self) -> Result<Vec<LandmarkFrame>, AppError> {
        validate_hands(&self.hands).map_err(|msg| AppError::bad_request("MALFORMED_FRAME", &msg))?;
        Ok(self.hands)
    }
}

async fn recognize(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<HandsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let hands = req.validated()?;
    Ok(ok(state.engine().tick(&hands)))
}

async fn scores(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<HandsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let hands = req.validated()?;
    let scores = match hands.first() {
        Some(live) => state.engine().scores(live),
        None => Vec::new(),
    };
    Ok(ok(scores))
}

async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    ok(state.engine().session())
}

async fn reset_session(State(state): State<AppState>) -> impl IntoResponse {
    state.engine().reset_session();
    tracing::info!("Recognition session reset");
    ok(state.engine().session())
}

async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    ok(state.engine().get_config())
}

async fn update_config(
    State(state): State<AppState>,
    JsonBody(config): JsonBody<MatcherConfig>,
) -> Result<impl IntoResponse, AppError> {
    state
        .engine()
        .reload_config(config)
        .map_err(|msg| AppError::bad_request("INVALID_CONFIG", &msg))?;
    Ok(ok(state.engine().get_config()))
}
