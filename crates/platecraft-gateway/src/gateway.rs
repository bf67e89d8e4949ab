use async_trait::async_trait;

use crate::{error::Result, types::ImageArtifact};

/// Request/response operations the generation pipeline needs from an AI backend
///
/// No operation is retried or assumed idempotent; callers issue each call
/// at most once per logical request.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Extract dish names, in menu order, from free-form menu text
    ///
    /// Fails unless the backend answers with a well-formed list of strings.
    async fn extract_dish_names(&self, menu_text: &str) -> Result<Vec<String>>;

    /// Render one image from a text prompt
    ///
    /// Fails if the backend returns no image.
    async fn generate_image(&self, prompt: &str) -> Result<ImageArtifact>;

    /// Apply a free-text instruction to an existing image
    ///
    /// Fails if the response holds no image part.
    async fn edit_image(&self, image: &ImageArtifact, instruction: &str) -> Result<ImageArtifact>;

    /// Gateway name for diagnostics
    fn name(&self) -> &str;
}
