use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Everything that can go wrong while turning a description into a page.
///
/// Every failure in the pipeline is terminal for the current request; there
/// are no retries. Each variant carries the message surfaced to the caller
/// and maps to exactly one HTTP status.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Upstream authentication failed: {0}")]
    UpstreamAuth(String),
    #[error("Upstream rate limit exceeded: {0}")]
    UpstreamRateLimit(String),
    #[error("Upstream rejected the request: {0}")]
    UpstreamRequest(String),
    #[error("Upstream returned an empty response: {0}")]
    UpstreamEmptyResponse(String),
    #[error("Generation failed: {0}")]
    Unknown(String),
}

impl GenerationError {
    /// Classify an upstream HTTP status into a typed error, keeping whatever
    /// detail the provider sent. Statuses without a dedicated category fall
    /// through to `Unknown`.
    pub fn from_upstream_status(status: u16, detail: String) -> Self {
        match status {
            401 => GenerationError::UpstreamAuth(detail),
            429 => GenerationError::UpstreamRateLimit(detail),
            400 => GenerationError::UpstreamRequest(detail),
            _ => GenerationError::Unknown(format!(
                "upstream responded with {}: {}",
                status, detail
            )),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GenerationError::Validation(_) => StatusCode::BAD_REQUEST,
            GenerationError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GenerationError::UpstreamAuth(_) => StatusCode::UNAUTHORIZED,
            GenerationError::UpstreamRateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            GenerationError::UpstreamRequest(_) => StatusCode::BAD_REQUEST,
            GenerationError::UpstreamEmptyResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GenerationError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Unknown(format!("request to upstream failed: {}", e))
    }
}

impl ResponseError for GenerationError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(json!({ "error": self.to_string() }))
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_statuses_map_to_typed_errors() {
        let auth = GenerationError::from_upstream_status(401, "bad key".into());
        assert!(matches!(auth, GenerationError::UpstreamAuth(_)));
        assert_eq!(auth.status(), StatusCode::UNAUTHORIZED);

        let limited = GenerationError::from_upstream_status(429, "slow down".into());
        assert!(matches!(limited, GenerationError::UpstreamRateLimit(_)));
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);

        let bad = GenerationError::from_upstream_status(400, "prompt rejected".into());
        assert!(matches!(bad, GenerationError::UpstreamRequest(_)));
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let other = GenerationError::from_upstream_status(503, "maintenance".into());
        assert!(matches!(other, GenerationError::Unknown(_)));
        assert_eq!(other.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn local_errors_use_expected_statuses() {
        assert_eq!(
            GenerationError::Validation("empty".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GenerationError::Config("no key".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GenerationError::UpstreamEmptyResponse("no image".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_response_is_json_with_mapped_status() {
        let resp = GenerationError::Validation("Description is required".into()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
