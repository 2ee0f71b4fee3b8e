use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::gesture::engine::TemplateError;
use crate::gesture::recording::RecordingError;
use crate::gesture::training::TrainingError;
use crate::store::StoreError;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub code: String,
    pub message: String,
    pub trace_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub is_operational: bool,
}

impl AppError {
    pub fn bad_request(code: &str, message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: code.to_string(),
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND".to_string(),
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn conflict(code: &str, message: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            code: code.to_string(),
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn unprocessable(code: &str, message: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            code: code.to_string(),
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn internal(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_ERROR".to_string(),
            message: message.to_string(),
            is_operational: false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let exposed_message = if self.is_operational {
            self.message.clone()
        } else {
            INTERNAL_ERROR_MESSAGE.to_string()
        };

        if self.is_operational {
            tracing::warn!(status = %self.status, code = %self.code, error = %self.message, "API error");
        } else {
            tracing::error!(status = %self.status, code = %self.code, error = %self.message, "Internal API error");
        }

        (
            self.status,
            Json(ErrorBody {
                success: false,
                code: self.code,
                message: exposed_message,
                trace_id: None,
            }),
        )
            .into_response()
    }
}

// Validation and NotFound carry caller-facing messages; everything else is
// redacted as an internal error.
impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        match &value {
            StoreError::Validation(msg) => AppError::bad_request("VALIDATION_ERROR", msg),
            StoreError::NotFound { entity, key } => {
                AppError::not_found(&format!("{entity} '{key}' not found"))
            }
            _ => AppError::internal(&value.to_string()),
        }
    }
}

impl From<TrainingError> for AppError {
    fn from(value: TrainingError) -> Self {
        match value {
            TrainingError::MissingName => {
                AppError::bad_request("MISSING_NAME", "Please enter a gesture name")
            }
            TrainingError::TooFewFrames { .. } => AppError::bad_request(
                "TOO_FEW_FRAMES",
                &format!("{value}. Please record for longer."),
            ),
            TrainingError::MalformedFrame { .. } => {
                AppError::bad_request("MALFORMED_FRAME", &value.to_string())
            }
            TrainingError::Storage(e) => e.into(),
        }
    }
}

impl From<RecordingError> for AppError {
    fn from(value: RecordingError) -> Self {
        match value {
            RecordingError::AlreadyRecording(_) => {
                AppError::conflict("RECORDING_ACTIVE", &value.to_string())
            }
            RecordingError::NotRecording => AppError::conflict("NOT_RECORDING", &value.to_string()),
            RecordingError::MissingName => {
                AppError::bad_request("MISSING_NAME", "Please enter a gesture name")
            }
            RecordingError::MalformedFrame => {
                AppError::bad_request("MALFORMED_FRAME", &value.to_string())
            }
        }
    }
}

impl From<TemplateError> for AppError {
    fn from(value: TemplateError) -> Self {
        match value {
            TemplateError::Store(e) => e.into(),
            TemplateError::Malformed(e) => {
                AppError::unprocessable("MALFORMED_TEMPLATE", &e.to_string())
            }
        }
    }
}

pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data,
        }),
    )
}

pub fn created<T: Serialize>(data: T) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            data,
        }),
    )
}
