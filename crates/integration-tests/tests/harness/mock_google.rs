//! Mock Google Generative Language backend for end-to-end tests

use platecraft_config::GatewayConfig;
use platecraft_gateway::GoogleGateway;
use secrecy::SecretString;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const EXTRACTION_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";
pub const PREDICT_PATH: &str = "/v1beta/models/imagen-4.0-generate-001:predict";
pub const EDIT_PATH: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";

/// Mock backend speaking the Gemini/Imagen wire format
pub struct MockGoogle {
    server: MockServer,
}

impl MockGoogle {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL including the API version segment
    pub fn base_url(&self) -> String {
        format!("{}/v1beta", self.server.uri())
    }

    /// Gateway pointed at this mock
    pub fn gateway(&self) -> GoogleGateway {
        let mut config = GatewayConfig::with_api_key(SecretString::from("test-key"));
        config.base_url = self.base_url().parse().expect("valid URL");
        GoogleGateway::new(&config).expect("gateway builds")
    }

    /// Extraction answers with `names` as a JSON array
    pub async fn extraction_returns(&self, names: &[&str]) {
        let text = serde_json::to_string(names).expect("serializable");
        Mock::given(method("POST"))
            .and(path(EXTRACTION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_candidate(&text)))
            .mount(&self.server)
            .await;
    }

    /// Extraction answers with a non-success status
    pub async fn extraction_fails(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(EXTRACTION_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
                "error": { "code": status, "message": "backend unavailable", "status": "UNAVAILABLE" }
            })))
            .mount(&self.server)
            .await;
    }

    /// Image generation for prompts mentioning `dish` returns `b64` bytes
    pub async fn image_for(&self, dish: &str, b64: &str) {
        Mock::given(method("POST"))
            .and(path(PREDICT_PATH))
            .and(body_string_contains(dish))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [{ "bytesBase64Encoded": b64, "mimeType": "image/png" }]
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Image generation for prompts mentioning `dish` fails with `status`
    pub async fn image_fails_for(&self, dish: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(PREDICT_PATH))
            .and(body_string_contains(dish))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Edits containing `instruction` return a JPEG with `b64` bytes
    pub async fn edit_returns(&self, instruction: &str, b64: &str) {
        Mock::given(method("POST"))
            .and(path(EDIT_PATH))
            .and(body_string_contains(instruction))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "inlineData": { "mimeType": "image/jpeg", "data": b64 } }] }
                }]
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Edits containing `instruction` come back without an image part
    pub async fn edit_refuses(&self, instruction: &str) {
        Mock::given(method("POST"))
            .and(path(EDIT_PATH))
            .and(body_string_contains(instruction))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_candidate("I cannot edit this image")))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Number of requests received on `request_path`
    pub async fn hits(&self, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == request_path)
            .count()
    }
}

fn text_candidate(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] }, "finishReason": "STOP" }]
    })
}
