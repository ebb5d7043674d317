use serde::{Deserialize, Serialize};

/// Inbound body of `POST /api/generate`.
///
/// The field is deserialized as raw JSON so that a missing or mistyped
/// `description` produces our own validation error instead of the framework's
/// default rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub description: serde_json::Value,
}

/// Image payload as returned by the provider, resolved once at the API
/// boundary so nothing downstream branches on the configured format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageData {
    /// Base64-encoded PNG bytes.
    Base64(String),
    /// URL the image can be fetched from.
    Url(String),
}

impl ImageData {
    pub fn into_inner(self) -> String {
        match self {
            ImageData::Base64(data) => data,
            ImageData::Url(url) => url,
        }
    }
}

/// Successful outcome of one generation request.
#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub success: bool,
    /// Base64 bytes or a URL, depending on the configured response format.
    pub image: String,
    /// The prompt that was actually sent to the image model.
    pub prompt: String,
    /// The caller's original description, echoed back untouched.
    pub description: String,
}
