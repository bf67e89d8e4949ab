#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Menu-to-gallery pipeline
//!
//! Turns pasted menu text into a gallery of dishes, each with its own
//! independently generated and editable photograph. State lives in a
//! [`GalleryStore`] that the orchestrators share; rendering layers
//! subscribe to it.

mod dish;
mod edit;
mod error;
mod generation;
mod store;

pub use dish::{Dish, DishId};
pub use edit::{EditOrchestrator, EditOutcome};
pub use error::{PlatecraftError, Result};
pub use generation::{BatchReport, GenerationOrchestrator};
pub use platecraft_config::ImageStyle;
pub use platecraft_gateway::{AiGateway, GatewayError, ImageArtifact};
pub use store::{BatchId, GalleryState, GalleryStore, Phase};
