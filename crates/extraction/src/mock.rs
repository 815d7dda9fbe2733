use std::sync::Mutex;

use crate::error::{ExtractionError, Result};
use crate::model::{InvokePayload, ModelInvoker};

enum Reply {
    Body(Vec<u8>),
    Failure(String),
}

/// Model invoker that answers with a canned reply and records every call.
///
/// Makes no network calls; meant for tests and local development.
pub struct MockInvoker {
    reply: Reply,
    calls: Mutex<Vec<(String, InvokePayload)>>,
}

impl MockInvoker {
    /// Responds with the given raw body
    pub fn with_body(body: impl Into<Vec<u8>>) -> Self {
        Self::new(Reply::Body(body.into()))
    }

    /// Responds with a single text completion
    pub fn with_text(text: &str) -> Self {
        let body = serde_json::json!({ "content": [{ "type": "text", "text": text }] });
        Self::with_body(body.to_string())
    }

    /// Fails every call with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(Reply::Failure(message.into()))
    }

    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Model id and payload of every invocation so far
    pub fn calls(&self) -> Vec<(String, InvokePayload)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ModelInvoker for MockInvoker {
    async fn invoke(&self, model_id: &str, payload: &InvokePayload) -> Result<Vec<u8>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((model_id.to_string(), payload.clone()));
        }

        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Failure(message) => Err(ExtractionError::ModelInvocation(message.clone())),
        }
    }
}
