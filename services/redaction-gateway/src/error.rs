use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use payload_redactor_engine::RedactionError;
use thiserror::Error;

use crate::api::ErrorResponse;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Body too large: exceeds limit of {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Request body rejected: {0}")]
    RejectedInput(String),

    #[error("Request redaction failed: {0}")]
    Redaction(#[from] RedactionError),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::BodyRead(_) | GatewayError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            GatewayError::RejectedInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::Redaction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::BodyTooLarge { .. } => "BODY_TOO_LARGE",
            GatewayError::BodyRead(_) => "BODY_READ_ERROR",
            GatewayError::InvalidJson(_) => "INVALID_JSON",
            GatewayError::RejectedInput(_) => "REJECTED_INPUT",
            GatewayError::Redaction(_) => "REDACTION_ERROR",
        }
    }

    pub fn to_response(&self, request_id: Option<&str>) -> Response {
        let body = ErrorResponse {
            error: self.error_code().to_string(),
            message: self.to_string(),
            request_id: request_id.map(str::to_string),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        self.to_response(None)
    }
}
