use aws_sdk_bedrockruntime::{
    config::{BehaviorVersion, Region},
    error::DisplayErrorContext,
    primitives::Blob,
};
use reqwest::{Client, Url, header};

use crate::error::{ExtractionError, Result};
use crate::model::{InvokePayload, ModelInvoker};

pub const DEFAULT_REGION: &str = "us-east-1";

enum Transport {
    /// SigV4-signed calls through the AWS SDK
    Sdk(aws_sdk_bedrockruntime::Client),
    /// Plain HTTPS with a Bedrock API key as bearer token
    ApiKey {
        http: Client,
        endpoint: Url,
        api_key: String,
    },
}

/// Client for the Bedrock runtime `InvokeModel` API
pub struct BedrockClient {
    transport: Transport,
    endpoint: String,
}

impl BedrockClient {
    /// Create a client for the given region
    ///
    /// Without an API key, credentials come from the AWS default chain
    /// (environment, shared profile, SSO, container or instance role).
    ///
    /// # Arguments
    /// * `region` - AWS region (e.g., "us-east-1")
    /// * `endpoint` - Optional base URL replacing the regional endpoint
    /// * `api_key` - Optional Bedrock API key; skips SigV4 when set
    pub async fn connect(
        region: &str,
        endpoint: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self> {
        if let Some(api_key) = api_key {
            let endpoint = endpoint.unwrap_or_else(|| Self::regional_endpoint(region));
            return Self::with_api_key(&endpoint, api_key);
        }

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        let mut builder = aws_sdk_bedrockruntime::config::Builder::from(&shared);
        if let Some(endpoint) = &endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        let endpoint = endpoint.unwrap_or_else(|| Self::regional_endpoint(region));
        Ok(Self::with_sdk_config(builder.build(), endpoint))
    }

    /// Create a SigV4 client from an explicit SDK configuration
    pub fn with_sdk_config(
        config: aws_sdk_bedrockruntime::Config,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            transport: Transport::Sdk(aws_sdk_bedrockruntime::Client::from_conf(config)),
            endpoint: endpoint.into(),
        }
    }

    /// Create a client that authenticates with a Bedrock API key
    pub fn with_api_key(endpoint: &str, api_key: impl Into<String>) -> Result<Self> {
        let url = Url::parse(endpoint).map_err(|e| {
            ExtractionError::ModelInvocation(format!("Invalid Bedrock endpoint {}: {}", endpoint, e))
        })?;

        Ok(Self {
            transport: Transport::ApiKey {
                http: Client::builder().build()?,
                endpoint: url,
                api_key: api_key.into(),
            },
            endpoint: endpoint.to_string(),
        })
    }

    pub fn regional_endpoint(region: &str) -> String {
        format!("https://bedrock-runtime.{}.amazonaws.com", region)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn uses_api_key(&self) -> bool {
        matches!(self.transport, Transport::ApiKey { .. })
    }

    /// `{endpoint}/model/{model_id}/invoke` with the model id escaped as one path segment
    fn invoke_url(endpoint: &Url, model_id: &str) -> Result<Url> {
        let mut url = endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ExtractionError::ModelInvocation(format!(
                    "Bedrock endpoint {} cannot take a path",
                    endpoint
                ))
            })?
            .pop_if_empty()
            .push("model")
            .push(model_id)
            .push("invoke");

        Ok(url)
    }

    async fn invoke_with_sdk(
        client: &aws_sdk_bedrockruntime::Client,
        model_id: &str,
        body: Vec<u8>,
    ) -> Result<Vec<u8>> {
        let output = client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                ExtractionError::ModelInvocation(format!(
                    "Bedrock request failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(output.body.into_inner())
    }

    async fn invoke_with_api_key(
        http: &Client,
        endpoint: &Url,
        api_key: &str,
        model_id: &str,
        body: Vec<u8>,
    ) -> Result<Vec<u8>> {
        let response = http
            .post(Self::invoke_url(endpoint, model_id)?)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .bearer_auth(api_key)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                ExtractionError::ModelInvocation(format!("Bedrock request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ExtractionError::ModelInvocation(format!(
                "Bedrock API error ({}): {}",
                status, error_text
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            ExtractionError::ModelInvocation(format!("Failed to read Bedrock response: {}", e))
        })?;

        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl ModelInvoker for BedrockClient {
    async fn invoke(&self, model_id: &str, payload: &InvokePayload) -> Result<Vec<u8>> {
        let prompt_chars: usize = payload.messages.iter().map(|m| m.content.len()).sum();
        tracing::info!(
            "Sending request to Bedrock (model: {}, prompt length: {} chars)",
            model_id,
            prompt_chars
        );

        let body = serde_json::to_vec(payload).map_err(|e| {
            ExtractionError::ModelInvocation(format!("Failed to encode Bedrock payload: {}", e))
        })?;

        let response = match &self.transport {
            Transport::Sdk(client) => Self::invoke_with_sdk(client, model_id, body).await?,
            Transport::ApiKey {
                http,
                endpoint,
                api_key,
            } => Self::invoke_with_api_key(http, endpoint, api_key, model_id, body).await?,
        };

        tracing::info!(
            "Bedrock invocation complete: {} bytes received",
            response.len()
        );

        Ok(response)
    }
}
