//! Menu text to gallery pipeline

use std::sync::Arc;

use futures::future::join_all;
use platecraft_config::ImageStyle;
use platecraft_gateway::AiGateway;

use crate::{
    dish::{Dish, DishId},
    error::{PlatecraftError, Result},
    store::{BatchId, GalleryStore},
};

/// Outcome of one settled batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub batch: BatchId,
    /// Dishes seeded from extraction
    pub total: usize,
    /// Dishes whose image request succeeded
    pub generated: usize,
    /// Dishes whose image request failed
    pub failed: Vec<DishId>,
    /// A newer submission replaced this batch before it settled
    pub superseded: bool,
}

/// Drives extraction, seeding and per-dish image fan-out
///
/// Does not serialise submissions itself; the calling surface is expected
/// to refuse a new one while [`GalleryStore::is_busy`] holds.
pub struct GenerationOrchestrator {
    gateway: Arc<dyn AiGateway>,
    store: GalleryStore,
}

impl GenerationOrchestrator {
    pub fn new(gateway: Arc<dyn AiGateway>, store: GalleryStore) -> Self {
        Self { gateway, store }
    }

    pub const fn store(&self) -> &GalleryStore {
        &self.store
    }

    /// Build a fresh gallery from `menu_text`, one photograph per dish
    ///
    /// Empty input is rejected before any request. An extraction failure
    /// is returned and recorded on the store. Individual image failures are
    /// logged and counted in the report, never returned.
    pub async fn generate_gallery(&self, menu_text: &str, style: ImageStyle) -> Result<BatchReport> {
        if menu_text.trim().is_empty() {
            return Err(PlatecraftError::empty_menu());
        }

        let batch = self.store.begin_extraction();

        tracing::info!(%batch, gateway = self.gateway.name(), %style, "parsing menu");

        let names = match self.gateway.extract_dish_names(menu_text).await {
            Ok(names) => names,
            Err(e) => {
                tracing::error!(%batch, error = %e, "menu extraction failed");
                let err = PlatecraftError::extraction(e);
                self.store.fail_extraction(batch, err.to_string());
                return Err(err);
            }
        };

        let Some(dishes) = self.store.seed(batch, names) else {
            return Ok(BatchReport {
                batch,
                total: 0,
                generated: 0,
                failed: Vec::new(),
                superseded: true,
            });
        };

        tracing::info!(%batch, dishes = dishes.len(), "generating dish images");

        let outcomes = join_all(dishes.iter().map(|dish| self.generate_dish(batch, dish, style))).await;

        self.store.finish_batch(batch);

        let failed: Vec<DishId> = dishes
            .iter()
            .zip(&outcomes)
            .filter(|(_, ok)| !**ok)
            .map(|(dish, _)| dish.id())
            .collect();

        let report = BatchReport {
            batch,
            total: dishes.len(),
            generated: dishes.len() - failed.len(),
            failed,
            superseded: self.store.snapshot().batch() != Some(batch),
        };

        tracing::info!(
            %batch,
            total = report.total,
            generated = report.generated,
            failed = report.failed.len(),
            superseded = report.superseded,
            "batch settled"
        );

        Ok(report)
    }

    /// Generate one dish's image; `false` if the request failed
    async fn generate_dish(&self, batch: BatchId, dish: &Dish, style: ImageStyle) -> bool {
        self.store.mark_generating(batch, dish.id());

        let prompt = style.dish_prompt(dish.name());

        match self.gateway.generate_image(&prompt).await {
            Ok(image) => {
                tracing::debug!(%batch, dish = %dish.name(), bytes = image.data.len(), "image generated");
                self.store.complete_generation(batch, dish.id(), Some(image));
                true
            }
            Err(e) => {
                tracing::warn!(%batch, dish = %dish.name(), error = %e, "image generation failed");
                self.store.complete_generation(batch, dish.id(), None);
                false
            }
        }
    }
}
