//! Google Generative Language API wire format types

use serde::{Deserialize, Serialize};

// -- generateContent --

/// Google `generateContent` request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleRequest {
    /// Conversation contents
    pub contents: Vec<GoogleContent>,
    /// Generation configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GoogleGenerationConfig>,
}

/// Google content object containing role and parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleContent {
    /// Role ("user" or "model")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts
    #[serde(default)]
    pub parts: Vec<GooglePart>,
}

impl GoogleContent {
    pub fn user(parts: Vec<GooglePart>) -> Self {
        Self {
            role: Some("user".to_owned()),
            parts,
        }
    }
}

/// Individual part within a content object
///
/// Responses may attach extra keys (thought signatures and the like), so
/// parts are modelled as a bag of optional fields rather than a tagged enum.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePart {
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<GoogleInlineData>,
}

impl GooglePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline(mime_type: impl Into<String>, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(GoogleInlineData {
                mime_type: mime_type.into(),
                data,
            }),
        }
    }
}

/// Inline binary data (images)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleInlineData {
    /// MIME type (e.g. "image/png")
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    /// Base64-encoded data
    pub data: String,
}

/// Generation configuration parameters
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleGenerationConfig {
    /// Response MIME type ("application/json" for structured output)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// OpenAPI-style schema the response must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    /// Output modalities ("TEXT", "IMAGE")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
}

/// Google `generateContent` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GoogleCandidate>,
}

impl GoogleResponse {
    /// Parts of the first candidate, if any
    pub fn first_parts(&self) -> &[GooglePart] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }
}

/// Generated candidate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCandidate {
    /// Generated content (absent when the candidate was blocked)
    #[serde(default)]
    pub content: Option<GoogleContent>,
}

// -- predict (Imagen) --

/// Imagen `predict` request
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

/// Single prompt instance
#[derive(Debug, Clone, Serialize)]
pub struct PredictInstance {
    pub prompt: String,
}

/// Imagen generation parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    /// Number of images to generate
    pub sample_count: u32,
    /// Output encoding
    pub output_mime_type: String,
    /// Aspect ratio (e.g. "1:1")
    pub aspect_ratio: String,
}

/// Imagen `predict` response
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// One generated image
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Base64-encoded image bytes (absent when filtered)
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

// -- Error response --

/// Google error response
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorResponse {
    pub error: GoogleErrorDetail,
}

/// Google error detail; only the message is kept
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorDetail {
    pub message: String,
}
