use anyhow::{Context, Result};
use extraction::{bedrock_client::DEFAULT_REGION, model::DEFAULT_MODEL_ID};
use std::fmt;

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub aws_region: String,
    pub model_id: String,
    pub bedrock_endpoint: Option<String>,
    pub bedrock_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a number, got {:?}", port))?,
            None => 3000,
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            aws_region: non_empty("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            model_id: non_empty("BEDROCK_MODEL_ID")
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            bedrock_endpoint: non_empty("BEDROCK_ENDPOINT"),
            bedrock_api_key: non_empty("AWS_BEARER_TOKEN_BEDROCK"),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("aws_region", &self.aws_region)
            .field("model_id", &self.model_id)
            .field("bedrock_endpoint", &self.bedrock_endpoint)
            .field(
                "bedrock_api_key",
                &self.bedrock_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
