use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractionError>;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),
}

impl From<reqwest::Error> for ExtractionError {
    fn from(error: reqwest::Error) -> Self {
        Self::ModelInvocation(format!("HTTP request failed: {}", error))
    }
}

impl From<serde_json::Error> for ExtractionError {
    fn from(error: serde_json::Error) -> Self {
        Self::ModelInvocation(format!("Failed to parse model response: {}", error))
    }
}
