//! Google Generative Language API gateway

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use platecraft_config::GatewayConfig;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::{GatewayError, Result},
    gateway::AiGateway,
    protocol::{
        GoogleContent, GoogleErrorResponse, GoogleGenerationConfig, GooglePart, GoogleRequest, GoogleResponse,
        PredictInstance, PredictParameters, PredictRequest, PredictResponse,
    },
    types::ImageArtifact,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gateway backed by Gemini (text, edits) and Imagen (generation)
pub struct GoogleGateway {
    name: String,
    client: Client,
    api_key: SecretString,
    base_url: String,
    extraction_model: String,
    image_model: String,
    edit_model: String,
    aspect_ratio: String,
    output_mime_type: String,
}

impl GoogleGateway {
    /// Create from gateway configuration
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Config` if the timeout is invalid or the HTTP
    /// client cannot be built
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let timeout = config
            .request_timeout()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: "google".to_owned(),
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
            extraction_model: config.extraction_model.clone(),
            image_model: config.image_model.clone(),
            edit_model: config.edit_model.clone(),
            aspect_ratio: config.aspect_ratio.clone(),
            output_mime_type: config.output_mime_type.clone(),
        })
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// POST a JSON body and decode a JSON reply, mapping failures to `GatewayError`
    async fn post<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(gateway = %self.name, error = %e, "upstream request failed");
                GatewayError::from(e)
            })?;

        let response = check_status(&self.name, response).await?;

        response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(format!("failed to parse response: {e}")))
    }
}

/// Turn a non-success response into `GatewayError::Api`
async fn check_status(gateway: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GoogleErrorResponse>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);

    tracing::warn!(gateway, status = %status, "upstream returned error");

    Err(GatewayError::Api {
        status: status.as_u16(),
        message,
    })
}

fn extraction_prompt(menu_text: &str) -> String {
    format!(
        "You are a menu parsing expert. Given the following text from a restaurant menu, extract only the names of \
         the dishes. Ignore prices, descriptions, and category headers. Return your response as a valid JSON array \
         of strings. Menu:\n\n{menu_text}"
    )
}

fn dish_list_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "STRING",
            "description": "The name of a single dish from the menu."
        }
    })
}

/// Validate the model's JSON answer as a list of dish names
///
/// Entries are trimmed and blank ones dropped; anything other than an
/// array of strings is rejected.
pub(crate) fn parse_dish_names(raw: &str) -> Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())
        .map_err(|e| GatewayError::MalformedResponse(format!("dish list is not valid JSON: {e}")))?;

    let serde_json::Value::Array(items) = value else {
        return Err(GatewayError::MalformedResponse("dish list is not a JSON array".to_owned()));
    };

    items
        .into_iter()
        .map(|item| match item {
            serde_json::Value::String(name) => Ok(name.trim().to_owned()),
            other => Err(GatewayError::MalformedResponse(format!(
                "dish list contains a non-string entry: {other}"
            ))),
        })
        .filter(|name| !matches!(name, Ok(n) if n.is_empty()))
        .collect()
}

fn decode_image(data: &str, media_type: String) -> Result<ImageArtifact> {
    let bytes = STANDARD
        .decode(data)
        .map_err(|e| GatewayError::MalformedResponse(format!("image payload is not valid base64: {e}")))?;
    Ok(ImageArtifact::new(bytes, media_type))
}

#[async_trait]
impl AiGateway for GoogleGateway {
    async fn extract_dish_names(&self, menu_text: &str) -> Result<Vec<String>> {
        let request = GoogleRequest {
            contents: vec![GoogleContent::user(vec![GooglePart::text(extraction_prompt(menu_text))])],
            generation_config: Some(GoogleGenerationConfig {
                response_mime_type: Some("application/json".to_owned()),
                response_schema: Some(dish_list_schema()),
                ..GoogleGenerationConfig::default()
            }),
        };

        tracing::debug!(gateway = %self.name, model = %self.extraction_model, "extracting dish names");

        let url = self.model_url(&self.extraction_model, "generateContent");
        let response: GoogleResponse = self.post(&url, &request).await?;

        let text: String = response.first_parts().iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            return Err(GatewayError::EmptyResult("extraction returned no text".to_owned()));
        }

        let names = parse_dish_names(&text)?;

        tracing::debug!(gateway = %self.name, count = names.len(), "dish names extracted");

        Ok(names)
    }

    async fn generate_image(&self, prompt: &str) -> Result<ImageArtifact> {
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_owned(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                output_mime_type: self.output_mime_type.clone(),
                aspect_ratio: self.aspect_ratio.clone(),
            },
        };

        tracing::debug!(gateway = %self.name, model = %self.image_model, "sending image generation request");

        let url = self.model_url(&self.image_model, "predict");
        let response: PredictResponse = self.post(&url, &request).await?;

        let (data, mime_type) = response
            .predictions
            .into_iter()
            .find_map(|p| p.bytes_base64_encoded.map(|data| (data, p.mime_type)))
            .ok_or_else(|| GatewayError::EmptyResult("no image was generated".to_owned()))?;

        decode_image(&data, mime_type.unwrap_or_else(|| self.output_mime_type.clone()))
    }

    async fn edit_image(&self, image: &ImageArtifact, instruction: &str) -> Result<ImageArtifact> {
        let request = GoogleRequest {
            contents: vec![GoogleContent::user(vec![
                GooglePart::inline(image.media_type.clone(), STANDARD.encode(&image.data)),
                GooglePart::text(instruction),
            ])],
            generation_config: Some(GoogleGenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_owned()]),
                ..GoogleGenerationConfig::default()
            }),
        };

        tracing::debug!(gateway = %self.name, model = %self.edit_model, "sending image edit request");

        let url = self.model_url(&self.edit_model, "generateContent");
        let response: GoogleResponse = self.post(&url, &request).await?;

        let inline = response
            .first_parts()
            .iter()
            .find_map(|p| p.inline_data.as_ref())
            .ok_or_else(|| GatewayError::EmptyResult("no edited image was returned".to_owned()))?;

        decode_image(&inline.data, inline.mime_type.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
