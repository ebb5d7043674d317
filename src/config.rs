use std::env;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// How the prompt sent to the image model is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptMode {
    /// Fill the fixed coloring-book template with the sanitized description.
    #[default]
    Direct,
    /// Ask the chat model to rewrite the description into a richer prompt.
    Rewrite,
}

impl PromptMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "direct" => Some(PromptMode::Direct),
            "rewrite" => Some(PromptMode::Rewrite),
            _ => None,
        }
    }
}

/// Which shape of image payload to request from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageResponseFormat {
    /// Inline base64-encoded bytes.
    #[default]
    Base64,
    /// A retrievable URL.
    Url,
}

impl ImageResponseFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "b64_json" | "base64" => Some(ImageResponseFormat::Base64),
            "url" => Some(ImageResponseFormat::Url),
            _ => None,
        }
    }

    /// Wire value for the images endpoint.
    pub fn as_wire(&self) -> &'static str {
        match self {
            ImageResponseFormat::Base64 => "b64_json",
            ImageResponseFormat::Url => "url",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub chat_model: String,
    pub image_model: String,
    pub response_format: ImageResponseFormat,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        OpenAiConfig {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            response_format: ImageResponseFormat::default(),
        }
    }
}

impl OpenAiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        let api_base = env::var("OPENAI_API_BASE")
            .ok()
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let chat_model = env::var("CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());
        let image_model =
            env::var("IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());
        let response_format = env::var("IMAGE_RESPONSE_FORMAT")
            .ok()
            .and_then(|v| ImageResponseFormat::parse(&v))
            .unwrap_or_default();

        OpenAiConfig {
            api_key,
            api_base,
            chat_model,
            image_model,
            response_format,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_models(
        mut self,
        chat_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        self.chat_model = chat_model.into();
        self.image_model = image_model.into();
        self
    }

    pub fn with_response_format(mut self, format: ImageResponseFormat) -> Self {
        self.response_format = format;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub port: Option<u16>,
    pub prompt_mode: PromptMode,
    pub openai: OpenAiConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());
        let prompt_mode = env::var("PROMPT_MODE")
            .ok()
            .and_then(|v| PromptMode::parse(&v))
            .unwrap_or_default();

        Config {
            port,
            prompt_mode,
            openai: OpenAiConfig::from_env(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_prompt_mode(mut self, mode: PromptMode) -> Self {
        self.prompt_mode = mode;
        self
    }

    pub fn with_openai(mut self, config: OpenAiConfig) -> Self {
        self.openai = config;
        self
    }
}
