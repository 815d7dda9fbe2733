use std::sync::Arc;

use crate::dto::{ExtractionRequest, ExtractionResult};
use crate::error::{ExtractionError, Result};
use crate::model::{InvokePayload, InvokeResponse, ModelInvoker};
use crate::prompts::PromptBuilder;

/// Pulls the newly composed reply out of an email thread using a hosted model
#[derive(Clone)]
pub struct Extractor {
    invoker: Arc<dyn ModelInvoker>,
    model_id: String,
}

impl Extractor {
    pub fn new(invoker: Arc<dyn ModelInvoker>, model_id: impl Into<String>) -> Self {
        Self {
            invoker,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Runs one prompt through the model and returns the trimmed first completion.
    ///
    /// An empty completion list is not an error; the result simply has no content.
    pub async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult> {
        if request.description.is_empty() {
            return Err(ExtractionError::InvalidInput(
                "description must not be empty".to_string(),
            ));
        }

        let prompt = PromptBuilder::reply_extraction(&request.description);
        let payload = InvokePayload::for_prompt(prompt);

        let body = self.invoker.invoke(&self.model_id, &payload).await?;
        let response = InvokeResponse::from_slice(&body)?;

        let content = response.first_text()?;
        if content.is_none() {
            tracing::warn!("Model {} returned no completion text", self.model_id);
        }

        Ok(ExtractionResult { content })
    }
}
