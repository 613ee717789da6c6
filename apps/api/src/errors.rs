use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ranking::LlmError;
use crate::sheets::SheetError;
use crate::table::merger::MergeError;
use crate::table::roster::RosterError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant surfaces a human-readable message directly to the caller —
/// nothing is swallowed and nothing is retried on this layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Spreadsheet source error: {0}")]
    Source(#[from] SheetError),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("Roster merge error: {0}")]
    Merge(#[from] MergeError),

    #[error("Model invocation error: {0}")]
    Model(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Source(SheetError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "SOURCE_NOT_FOUND", msg.clone())
            }
            AppError::Source(e) => {
                tracing::error!("Spreadsheet service error: {e}");
                (StatusCode::BAD_GATEWAY, "SOURCE_SERVICE_ERROR", e.to_string())
            }
            AppError::Roster(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ROSTER_ERROR",
                e.to_string(),
            ),
            AppError::Merge(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ROSTER_MATCH_ERROR",
                e.to_string(),
            ),
            AppError::Model(e) => {
                tracing::error!("Model invocation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MODEL_INVOCATION_ERROR",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
