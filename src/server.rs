use crate::{
    config::Config,
    error::GenerationError,
    logger::Timer,
    models::GenerationRequest,
    pipeline::Pipeline,
};
use actix_web::{get, post, web, HttpResponse, HttpServer};
use uuid::Uuid;

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("Ok")
}

#[post("/api/generate")]
pub async fn generate(
    body: web::Json<GenerationRequest>,
    pipeline: web::Data<Pipeline>,
) -> Result<HttpResponse, GenerationError> {
    let request_id = Uuid::new_v4();
    let _timer = Timer::new("generate");

    log::info!("[req:{}] generation request received", request_id);

    let response = pipeline.generate(&body).await.map_err(|e| {
        log::error!("[req:{}] {}", request_id, e);
        e
    })?;

    log::info!(
        "[req:{}] page generated, image payload is {} characters",
        request_id,
        response.image.len()
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Malformed JSON bodies get the same `{ "error": ... }` envelope as every
/// other failure instead of actix's plain-text default.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        GenerationError::Validation(format!("invalid JSON body: {}", err)).into()
    })
}

pub async fn startup(config: Config) -> std::io::Result<()> {
    let port = config.port.unwrap_or(8080);
    let pipeline = web::Data::new(Pipeline::new(&config));

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(pipeline.clone())
            .app_data(json_config())
            .service(health)
            .service(generate)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PromptMode;
    use crate::error::Result;
    use crate::models::ImageData;
    use crate::pipeline::{ImageGenerator, TextRewriter};
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct NoRewriter;

    #[async_trait]
    impl TextRewriter for NoRewriter {
        async fn rewrite(&self, _system: &str, _user: &str) -> Result<Option<String>> {
            Ok(None)
        }
    }

    struct FakeGenerator {
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl ImageGenerator for FakeGenerator {
        async fn generate_image(&self, _prompt: &str) -> Result<ImageData> {
            self.called.store(true, Ordering::SeqCst);
            Ok(ImageData::Url("https://images.example/page.png".to_string()))
        }
    }

    fn test_pipeline(called: Arc<AtomicBool>) -> web::Data<Pipeline> {
        web::Data::new(Pipeline::with_capabilities(
            PromptMode::Direct,
            Arc::new(NoRewriter),
            Arc::new(FakeGenerator { called }),
        ))
    }

    #[actix_web::test]
    async fn health_endpoint_answers_ok() {
        let app = test::init_service(App::new().service(health)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request())
            .await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn generate_returns_the_pipeline_result() {
        let called = Arc::new(AtomicBool::new(false));
        let app = test::init_service(
            App::new()
                .app_data(test_pipeline(called.clone()))
                .app_data(json_config())
                .service(generate),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(json!({ "description": "a friendly dragon" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["image"], json!("https://images.example/page.png"));
        assert_eq!(body["description"], json!("a friendly dragon"));
        assert!(called.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn missing_description_is_a_400_with_error_field() {
        let called = Arc::new(AtomicBool::new(false));
        let app = test::init_service(
            App::new()
                .app_data(test_pipeline(called.clone()))
                .app_data(json_config())
                .service(generate),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(json!({ "something_else": "value" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
        assert!(!called.load(Ordering::SeqCst));
    }
}
