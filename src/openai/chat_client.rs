use crate::{
    config::OpenAiConfig,
    error::{GenerationError, Result},
    models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, UpstreamErrorEnvelope},
    openai::require_api_key,
};

/// Client for the chat-completions endpoint, used by rewrite mode to turn a
/// bare description into a richer image prompt.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl ChatClient {
    pub fn new(http: reqwest::Client, config: OpenAiConfig) -> Self {
        Self { http, config }
    }

    /// One chat-completion round trip. Returns `Ok(None)` when the provider
    /// answered successfully but produced no usable text; the caller decides
    /// what that means.
    pub async fn complete(&self, system: &str, user: &str) -> Result<Option<String>> {
        let api_key = require_api_key(&self.config)?;

        let request = ChatCompletionRequest {
            model: self.config.chat_model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            max_tokens: 300,
            temperature: 0.7,
        };

        log::info!("Requesting prompt rewrite from model: {}", self.config.chat_model);
        log::debug!("Rewrite input length: {} characters", user.len());

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = UpstreamErrorEnvelope::extract_detail(&body);
            log::error!("Chat completion failed with {}: {}", status, detail);
            return Err(GenerationError::from_upstream_status(status.as_u16(), detail));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Unknown(format!("malformed chat response: {}", e)))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty());

        Ok(text)
    }
}
