use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use extraction::{ExtractionRequest, ExtractionResult};
use serde_json::Value;

use crate::error::{ErrorResponse, WebResult};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/extract",
    request_body = ExtractionRequest,
    responses(
        (status = 200, description = "Reply extracted; content is omitted when the model returned nothing", body = ExtractionResult),
        (status = 400, description = "Missing or non-string description", body = ErrorResponse),
        (status = 500, description = "Model invocation failed", body = ErrorResponse)
    ),
    tag = "extraction"
)]
pub async fn extract(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> WebResult<Response> {
    let Json(body) = payload?;
    let request = ExtractionRequest::from_json(body)?;

    let result = services::extract_reply(&state.extractor, &request).await?;

    Ok(Json(result).into_response())
}
