use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ExtractionError, Result};

pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request. Must include \"description\" string.";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ExtractionRequest {
    /// Raw email thread, passed to the model verbatim
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
}

impl ExtractionRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// Accepts any JSON body and checks that `description` is a non-empty string.
    pub fn from_json(body: Value) -> Result<Self> {
        let request: Self = serde_json::from_value(body)
            .map_err(|e| ExtractionError::InvalidInput(e.to_string()))?;

        request
            .validate()
            .map_err(|e| ExtractionError::InvalidInput(e.to_string()))?;

        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct ExtractionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
