pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod openai;
pub mod pipeline;
pub mod server;

pub use config::{Config, ImageResponseFormat, OpenAiConfig, PromptMode};
pub use error::{GenerationError, Result};
pub use models::{GenerationRequest, GenerationResponse, ImageData};
pub use openai::OpenAiClient;
pub use pipeline::Pipeline;
