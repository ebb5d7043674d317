pub mod chat_client;
pub mod image_client;

use crate::{
    config::OpenAiConfig,
    error::{GenerationError, Result},
    models::ImageData,
    pipeline::{ImageGenerator, TextRewriter},
};
use async_trait::async_trait;

pub use chat_client::ChatClient;
pub use image_client::ImageClient;

/// Facade over the two OpenAI endpoints the service uses. One long-lived
/// reqwest client is shared by both; the API key is checked per call so a
/// misconfigured deployment answers every request with a configuration error
/// instead of failing to boot.
#[derive(Clone)]
pub struct OpenAiClient {
    chat_client: ChatClient,
    image_client: ImageClient,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        let http = reqwest::Client::new();

        Self {
            chat_client: ChatClient::new(http.clone(), config.clone()),
            image_client: ImageClient::new(http, config),
        }
    }

    pub fn chat(&self) -> &ChatClient {
        &self.chat_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[async_trait]
impl TextRewriter for OpenAiClient {
    async fn rewrite(&self, system: &str, user: &str) -> Result<Option<String>> {
        self.chat().complete(system, user).await
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    async fn generate_image(&self, prompt: &str) -> Result<ImageData> {
        self.image().generate(prompt).await
    }
}

/// Resolve the configured API key, or fail the request with a configuration
/// error. Presence is the only check; the provider validates the key itself.
pub(crate) fn require_api_key(config: &OpenAiConfig) -> Result<&str> {
    config
        .api_key
        .as_deref()
        .ok_or_else(|| GenerationError::Config("OpenAI API key is not configured".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_a_config_error() {
        let config = OpenAiConfig::new();
        let err = require_api_key(&config).unwrap_err();
        assert!(matches!(err, GenerationError::Config(_)));
    }

    #[test]
    fn present_api_key_passes_the_check() {
        let config = OpenAiConfig::new().with_api_key("sk-test");
        assert_eq!(require_api_key(&config).unwrap(), "sk-test");
    }
}
