use anyhow::Context;
use extraction::{BedrockClient, Extractor};
use std::sync::Arc;
use web::{app, config::Config, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting reply extraction gateway");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded successfully");

    let client = BedrockClient::connect(
        &config.aws_region,
        config.bedrock_endpoint.clone(),
        config.bedrock_api_key.clone(),
    )
    .await
    .context("Failed to create Bedrock client")?;

    if client.uses_api_key() {
        tracing::info!("Authenticating to Bedrock with AWS_BEARER_TOKEN_BEDROCK");
    } else {
        tracing::info!("Authenticating to Bedrock with the AWS default credential chain");
    }
    tracing::info!(
        "Bedrock client ready at {} (model: {})",
        client.endpoint(),
        config.model_id
    );

    let extractor = Extractor::new(Arc::new(client), config.model_id.clone());
    let router = app(AppState::new(extractor));

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Server running at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, router).await?;

    Ok(())
}
