pub mod bedrock_client;
pub mod dto;
pub mod error;
pub mod extractor;
pub mod mock;
pub mod model;
pub mod prompts;

pub use bedrock_client::BedrockClient;
pub use dto::{ExtractionRequest, ExtractionResult};
pub use error::{ExtractionError, Result};
pub use extractor::Extractor;
pub use mock::MockInvoker;
pub use model::{InvokePayload, ModelInvoker};
