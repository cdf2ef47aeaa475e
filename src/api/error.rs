//! API Error Mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::remote::RemoteError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid JSON")]
    MalformedPayload,
    /// Remote store answered with an error; relay its status and message
    #[error("remote returned HTTP {status}")]
    Remote { status: u16, body: String },
    #[error("Internal server error")]
    Internal(String),
}

impl From<RemoteError> for ApiError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Status { status, body } => ApiError::Remote { status, body },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MalformedPayload => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid JSON"})),
            )
                .into_response(),
            ApiError::Remote { status, body } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(json!({"error": body}))).into_response()
            }
            ApiError::Internal(detail) => {
                error!("API Error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal server error"})),
                )
                    .into_response()
            }
        }
    }
}
