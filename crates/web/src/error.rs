use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use extraction::{ExtractionError, dto::INVALID_REQUEST_MESSAGE};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract email.";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Extraction(ExtractionError),
    MalformedBody(JsonRejection),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extraction(e) => write!(f, "Extraction error: {}", e),
            Self::MalformedBody(e) => write!(f, "Malformed body: {}", e.body_text()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            Self::Extraction(ExtractionError::InvalidInput(detail)) => {
                tracing::debug!("Rejected extraction request: {}", detail);
                (StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE)
            }
            Self::MalformedBody(rejection) => {
                tracing::debug!("Rejected extraction request body: {}", rejection.body_text());
                (StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE)
            }
            Self::Extraction(ExtractionError::ModelInvocation(detail)) => {
                tracing::error!("Error invoking Bedrock: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, EXTRACTION_FAILED_MESSAGE)
            }
        };

        let body = ErrorResponse {
            error: message.to_string(),
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<ExtractionError> for WebError {
    fn from(error: ExtractionError) -> Self {
        Self::Extraction(error)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection)
    }
}

pub type WebResult<T> = Result<T, WebError>;
