use colorbook::{logger, server, Config};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(
        logger::LoggerConfig::development().with_level(logger::LogLevel::Debug),
    )?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let config = Config::from_env();

    match &config.openai.api_key {
        Some(key) => {
            log::info!("✅ OpenAI API key found in environment");
            log::debug!("API key starts with: {}...", logger::credential_prefix(key));
        }
        None => {
            log::warn!("⚠️  OPENAI_API_KEY is not set");
            log::error!("❌ Every generation request will fail until it is configured");
        }
    }

    log::info!("🎨 Prompt mode: {:?}", config.prompt_mode);
    log::info!("🖼️  Image model: {}", config.openai.image_model);
    log::info!("🖼️  Response format: {:?}", config.openai.response_format);

    let port = config.port.unwrap_or(8080);
    logger::log_startup_info("colorbook", env!("CARGO_PKG_VERSION"), port);

    server::startup(config).await?;

    Ok(())
}
