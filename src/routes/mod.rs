pub mod gestures;
pub mod health;
pub mod recognition;
pub mod training;

use axum::extract::DefaultBodyLimit;
use axum::response::IntoResponse;
use axum::Router;

use crate::constants::MAX_BODY_SIZE;
use crate::middleware::request_id;
use crate::response::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/gestures", gestures::router())
        .nest("/recognition", recognition::router())
        .nest("/training", training::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE));

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::router())
        .fallback(fallback_404)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .with_state(state)
}

async fn fallback_404() -> impl IntoResponse {
    AppError::not_found("Route not found")
}
