use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Database not configured")]
    StoreUnavailable,

    #[error("Database operation failed")]
    Store(#[from] mongodb::error::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] mongodb::bson::ser::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MalformedPayload(detail) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "malformed payload", "detail": detail })),
            )
                .into_response(),

            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "validation failed", "fields": errors })),
            )
                .into_response(),

            AppError::StoreUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "database not configured" })),
            )
                .into_response(),

            // Driver errors may carry connection details, so the response
            // stays generic and the detail goes to the log only.
            AppError::Store(e) => {
                error!("Database error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "error": "database operation failed" })),
                )
                    .into_response()
            }

            AppError::Internal(e) => {
                error!("Serialization error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal error" })),
                )
                    .into_response()
            }
        }
    }
}
