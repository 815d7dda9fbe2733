use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ExtractionError, Result};

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

pub const MAX_TOKENS: u32 = 1024;
pub const TEMPERATURE: f32 = 0.0;
pub const TOP_P: f32 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the Anthropic messages API as exposed by Bedrock `InvokeModel`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokePayload {
    pub anthropic_version: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl InvokePayload {
    /// Single-turn, greedy-sampling payload for one user prompt.
    pub fn for_prompt(prompt: impl Into<String>) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION.to_string(),
            messages: vec![Message::user(prompt)],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }
}

/// Raw model response, walked leniently like an optional-chained lookup
#[derive(Debug, Clone)]
pub struct InvokeResponse {
    body: Value,
}

impl InvokeResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let body: Value = serde_json::from_slice(body)?;
        if body.is_null() {
            return Err(ExtractionError::ModelInvocation(
                "Model response body is null".to_string(),
            ));
        }

        Ok(Self { body })
    }

    /// Trimmed text of the first completion, if the model produced one.
    ///
    /// A missing `content`, an empty or non-list `content`, or a first block
    /// without `text` all mean "no completion". A `text` that is present but
    /// not a string is an error.
    pub fn first_text(&self) -> Result<Option<String>> {
        let text = self
            .body
            .get("content")
            .and_then(|content| content.get(0))
            .and_then(|block| block.get("text"));

        match text {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.trim().to_string())),
            Some(other) => Err(ExtractionError::ModelInvocation(format!(
                "Completion text is not a string: {}",
                other
            ))),
        }
    }
}

/// Capability to run one inference call against a hosted model.
///
/// Implementations own transport, authentication and region selection.
/// They must be safe to share across concurrent requests.
#[async_trait::async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, model_id: &str, payload: &InvokePayload) -> Result<Vec<u8>>;
}
