use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::gateway::SEMANTLE_STATUS_HEADER;
use crate::pipeline::PipelineError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not a valid word: {0}")]
    UnknownWord(String),

    #[error("daily word data not found")]
    SnapshotUnavailable,

    #[error("unauthorized")]
    Unauthorized,

    #[error("daily generation failed: {0}")]
    GenerationFailed(#[from] PipelineError),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, semantle_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::UnknownWord(_) => (StatusCode::BAD_REQUEST, "unknown_word"),
            GatewayError::SnapshotUnavailable => (StatusCode::NOT_FOUND, "not_found"),
            GatewayError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            GatewayError::GenerationFailed(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.kind()),
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        // Generation failures carry paths; keep them in logs only.
        let error_message = match &self {
            GatewayError::GenerationFailed(_) => "daily generation failed".to_string(),
            GatewayError::InternalError(_) => "internal server error".to_string(),
            _ => self.to_string(),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            SEMANTLE_STATUS_HEADER,
            HeaderValue::from_str(semantle_status).unwrap_or(HeaderValue::from_static("error")),
        );

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
