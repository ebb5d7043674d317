pub mod prompt;
pub mod sanitize;

use crate::{
    config::{Config, PromptMode},
    error::{GenerationError, Result},
    models::{GenerationRequest, GenerationResponse, ImageData},
    openai::OpenAiClient,
};
use async_trait::async_trait;
use std::sync::Arc;

pub use prompt::{direct_prompt, tidy_rewritten_prompt, MAX_PROMPT_CHARS, REWRITE_SYSTEM_PROMPT};
pub use sanitize::{sanitize, MAX_DESCRIPTION_CHARS};

/// Text-rewrite capability: a system instruction plus a user message in,
/// generated text (or nothing) out.
#[async_trait]
pub trait TextRewriter: Send + Sync {
    async fn rewrite(&self, system: &str, user: &str) -> Result<Option<String>>;
}

/// Image-generation capability: one prompt in, one image out.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<ImageData>;
}

/// The request-handling pipeline: validate, sanitize, build a prompt
/// (directly or via rewrite), generate the image.
///
/// Holds no request state; one instance is shared across all requests. The
/// two external capabilities are injected so tests can stand in fakes.
#[derive(Clone)]
pub struct Pipeline {
    mode: PromptMode,
    rewriter: Arc<dyn TextRewriter>,
    generator: Arc<dyn ImageGenerator>,
}

impl Pipeline {
    pub fn new(config: &Config) -> Self {
        let client = Arc::new(OpenAiClient::new(config.openai.clone()));
        Self::with_capabilities(config.prompt_mode, client.clone(), client)
    }

    pub fn with_capabilities(
        mode: PromptMode,
        rewriter: Arc<dyn TextRewriter>,
        generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            mode,
            rewriter,
            generator,
        }
    }

    /// Confirm the raw `description` field is a usable string. No side
    /// effects; nothing upstream is contacted before this passes.
    pub fn validate_description(description: &serde_json::Value) -> Result<&str> {
        let description = description.as_str().ok_or_else(|| {
            GenerationError::Validation(
                "Description is required and must be a string".to_string(),
            )
        })?;

        if description.trim().is_empty() {
            return Err(GenerationError::Validation(
                "Description must not be empty".to_string(),
            ));
        }

        Ok(description)
    }

    /// Run one request through the full pipeline. Strictly sequential; the
    /// first failing step aborts the request.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let description = Self::validate_description(&request.description)?;

        let sanitized = sanitize(description);
        if sanitized.is_empty() {
            return Err(GenerationError::Validation(
                "Description contains no usable characters".to_string(),
            ));
        }
        log::debug!("Sanitized description: {}", sanitized);

        let prompt = match self.mode {
            PromptMode::Direct => direct_prompt(&sanitized),
            PromptMode::Rewrite => {
                let rewritten = self
                    .rewriter
                    .rewrite(REWRITE_SYSTEM_PROMPT, &sanitized)
                    .await?
                    .ok_or_else(|| {
                        GenerationError::UpstreamEmptyResponse(
                            "prompt rewrite produced no text".to_string(),
                        )
                    })?;

                let tidied = tidy_rewritten_prompt(&rewritten);
                if tidied.is_empty() {
                    return Err(GenerationError::UpstreamEmptyResponse(
                        "prompt rewrite produced no text".to_string(),
                    ));
                }
                tidied
            }
        };
        log::debug!("Final prompt ({} characters): {}", prompt.len(), prompt);

        let image = self.generator.generate_image(&prompt).await?;

        Ok(GenerationResponse {
            success: true,
            image: image.into_inner(),
            prompt,
            description: description.to_string(),
        })
    }
}
