use crate::{
    config::{ImageResponseFormat, OpenAiConfig},
    error::{GenerationError, Result},
    models::{ImageData, ImageGenerationRequest, ImageGenerationResponse, UpstreamErrorEnvelope},
    openai::require_api_key,
};
use base64::Engine as _;

/// Output resolution requested for every page. The provider only accepts a
/// handful of fixed sizes; square pages print best.
const IMAGE_SIZE: &str = "1024x1024";

/// Client for the image-generations endpoint.
#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl ImageClient {
    pub fn new(http: reqwest::Client, config: OpenAiConfig) -> Self {
        Self { http, config }
    }

    /// Generate exactly one square image for the prompt. No retries; any
    /// failure is surfaced to the caller as-is.
    pub async fn generate(&self, prompt: &str) -> Result<ImageData> {
        let api_key = require_api_key(&self.config)?;

        let request = ImageGenerationRequest {
            model: self.config.image_model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: IMAGE_SIZE.to_string(),
            response_format: self.config.response_format.as_wire().to_string(),
        };

        log::info!("Generating image with model: {}", self.config.image_model);
        log::debug!("Image prompt length: {} characters", prompt.len());

        let response = self
            .http
            .post(format!("{}/images/generations", self.config.api_base))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = UpstreamErrorEnvelope::extract_detail(&body);
            log::error!("Image generation failed with {}: {}", status, detail);
            return Err(GenerationError::from_upstream_status(status.as_u16(), detail));
        }

        let parsed: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Unknown(format!("malformed image response: {}", e)))?;

        resolve_image(parsed, self.config.response_format)
    }
}

/// Pull the single requested image out of a successful response, resolving
/// the configured format here so nothing downstream has to branch on it
/// again. A success body with no usable image is an empty-response error.
fn resolve_image(
    response: ImageGenerationResponse,
    format: ImageResponseFormat,
) -> Result<ImageData> {
    let datum = response.data.into_iter().next().ok_or_else(|| {
        GenerationError::UpstreamEmptyResponse("no images were generated".to_string())
    })?;

    let image = match format {
        ImageResponseFormat::Base64 => datum.b64_json.map(ImageData::Base64),
        ImageResponseFormat::Url => datum.url.map(ImageData::Url),
    };

    let image = image.ok_or_else(|| {
        GenerationError::UpstreamEmptyResponse(
            "image response contained no image data".to_string(),
        )
    })?;

    if let ImageData::Base64(data) = &image {
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| {
                GenerationError::Unknown(format!("upstream returned invalid base64: {}", e))
            })?;
        log::debug!("Received inline image payload, {} characters", data.len());
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ImageGenerationResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn resolves_inline_bytes_under_base64_format() {
        let response = parse(r#"{"data":[{"b64_json":"aW1hZ2UtYnl0ZXM="}]}"#);
        let image = resolve_image(response, ImageResponseFormat::Base64).unwrap();
        assert_eq!(image, ImageData::Base64("aW1hZ2UtYnl0ZXM=".to_string()));
    }

    #[test]
    fn resolves_locator_under_url_format() {
        let response = parse(r#"{"data":[{"url":"https://images.example/page.png"}]}"#);
        let image = resolve_image(response, ImageResponseFormat::Url).unwrap();
        assert_eq!(
            image,
            ImageData::Url("https://images.example/page.png".to_string())
        );
    }

    #[test]
    fn empty_data_array_is_an_empty_response_error() {
        let response = parse(r#"{"data":[]}"#);
        let err = resolve_image(response, ImageResponseFormat::Base64).unwrap_err();
        assert!(matches!(err, GenerationError::UpstreamEmptyResponse(_)));

        // The provider may omit the array entirely.
        let response = parse("{}");
        let err = resolve_image(response, ImageResponseFormat::Base64).unwrap_err();
        assert!(matches!(err, GenerationError::UpstreamEmptyResponse(_)));
    }

    #[test]
    fn missing_inline_field_under_base64_format_is_an_empty_response_error() {
        // Datum only carries a url, but inline bytes were requested.
        let response = parse(r#"{"data":[{"url":"https://images.example/page.png"}]}"#);
        let err = resolve_image(response, ImageResponseFormat::Base64).unwrap_err();
        assert!(matches!(err, GenerationError::UpstreamEmptyResponse(_)));
    }

    #[test]
    fn missing_locator_under_url_format_is_an_empty_response_error() {
        let response = parse(r#"{"data":[{"b64_json":"aW1hZ2UtYnl0ZXM="}]}"#);
        let err = resolve_image(response, ImageResponseFormat::Url).unwrap_err();
        assert!(matches!(err, GenerationError::UpstreamEmptyResponse(_)));
    }

    #[test]
    fn garbage_inline_payload_is_rejected() {
        let response = parse(r#"{"data":[{"b64_json":"not!!valid@@base64"}]}"#);
        let err = resolve_image(response, ImageResponseFormat::Base64).unwrap_err();
        assert!(matches!(err, GenerationError::Unknown(_)));
    }
}
