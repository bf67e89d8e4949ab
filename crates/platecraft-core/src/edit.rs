//! Prompt-based editing of a single dish image

use std::sync::Arc;

use platecraft_gateway::{AiGateway, ImageArtifact};

use crate::{
    dish::Dish,
    error::{PlatecraftError, Result},
    store::GalleryStore,
};

/// Result of an edit attempt that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Dish had no image or the instruction was blank; nothing was sent
    Skipped,
    /// Edit succeeded; `patched` is false if the dish had left the gallery
    Applied { image: ImageArtifact, patched: bool },
}

/// Applies free-text edits to one dish image at a time
///
/// Edits on different dishes are independent and may run concurrently.
pub struct EditOrchestrator {
    gateway: Arc<dyn AiGateway>,
    store: GalleryStore,
}

impl EditOrchestrator {
    pub fn new(gateway: Arc<dyn AiGateway>, store: GalleryStore) -> Self {
        Self { gateway, store }
    }

    /// Edit `dish`'s current image according to `instruction`
    ///
    /// On failure the dish keeps its image and stays editable.
    pub async fn edit_dish_image(&self, dish: &Dish, instruction: &str) -> Result<EditOutcome> {
        let instruction = instruction.trim();
        let Some(image) = dish.image().filter(|_| !instruction.is_empty()) else {
            tracing::debug!(dish = %dish.name(), "edit skipped: no image or empty instruction");
            return Ok(EditOutcome::Skipped);
        };

        tracing::info!(dish = %dish.name(), gateway = self.gateway.name(), "editing image");

        let edited = self.gateway.edit_image(image, instruction).await.map_err(|e| {
            tracing::error!(dish = %dish.name(), error = %e, "image edit failed");
            PlatecraftError::edit(e)
        })?;

        let patched = self.store.replace_image(dish.id(), edited.clone());
        if !patched {
            tracing::debug!(dish = %dish.name(), "edited dish no longer in gallery");
        }

        Ok(EditOutcome::Applied { image: edited, patched })
    }
}
