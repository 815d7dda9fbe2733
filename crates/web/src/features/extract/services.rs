use extraction::{ExtractionRequest, ExtractionResult, Extractor, Result};

/// Extract the composed reply from an email thread
pub async fn extract_reply(
    extractor: &Extractor,
    request: &ExtractionRequest,
) -> Result<ExtractionResult> {
    tracing::info!(
        "Extracting reply (model: {}, input length: {} chars)",
        extractor.model_id(),
        request.description.len()
    );

    let result = extractor.extract(request).await?;

    tracing::debug!(
        "Extraction finished, content length: {}",
        result.content.as_ref().map_or(0, String::len)
    );

    Ok(result)
}
