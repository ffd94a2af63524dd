use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shardlink_core::StoreError;
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("short code not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            AppError::Store(StoreError::Validation(message)) => (StatusCode::BAD_REQUEST, message),
            AppError::Store(StoreError::BackendUnavailable(e)) => {
                error!(error = %e, "shard backend unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "storage temporarily unavailable".to_string(),
                )
            }
            AppError::Store(StoreError::Configuration(e)) => {
                error!(error = %e, "store misconfigured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
