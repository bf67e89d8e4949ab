//! Gallery state container
//!
//! All gallery mutation goes through the transition methods on
//! [`GalleryStore`]. Each transition is one `watch` update, so readers
//! never observe a dish marked finished without its image applied.
//!
//! Transitions that carry a [`BatchId`] are ignored once that batch has
//! been superseded by a newer submission.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use platecraft_gateway::ImageArtifact;
use tokio::sync::watch;
use uuid::Uuid;

use crate::dish::{Dish, DishId};

/// Identifies one submission of menu text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchId(Uuid);

impl BatchId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Pipeline phase of the current batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing running
    #[default]
    Idle,
    /// Waiting on dish extraction
    Extracting,
    /// Dishes seeded, images being generated
    Generating,
}

/// Snapshot of the gallery
#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    batch: Option<BatchId>,
    phase: Phase,
    dishes: Vec<Arc<Dish>>,
    in_flight: HashSet<DishId>,
    error: Option<String>,
}

impl GalleryState {
    /// Batch that owns the current gallery
    pub const fn batch(&self) -> Option<BatchId> {
        self.batch
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Dishes in extraction order
    pub fn dishes(&self) -> &[Arc<Dish>] {
        &self.dishes
    }

    pub fn dish(&self, id: DishId) -> Option<&Arc<Dish>> {
        self.dishes.iter().find(|d| d.id() == id)
    }

    /// Dishes with an outstanding image generation request
    pub const fn in_flight(&self) -> &HashSet<DishId> {
        &self.in_flight
    }

    pub fn is_generating(&self, id: DishId) -> bool {
        self.in_flight.contains(&id)
    }

    /// Whether the menu is still being parsed
    pub fn is_extracting(&self) -> bool {
        self.phase == Phase::Extracting
    }

    /// Submission error from the last batch, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a new submission should be refused
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle || !self.in_flight.is_empty()
    }

    fn is_current(&self, batch: BatchId) -> bool {
        self.batch == Some(batch)
    }
}

/// Shared, observable owner of the gallery
///
/// Cloning is cheap; all clones see and mutate the same state.
#[derive(Debug, Clone)]
pub struct GalleryStore {
    tx: Arc<watch::Sender<GalleryState>>,
}

impl Default for GalleryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryStore {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(GalleryState::default())),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> GalleryState {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every effective state change
    pub fn subscribe(&self) -> watch::Receiver<GalleryState> {
        self.tx.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.tx.borrow().is_busy()
    }

    /// Start a new submission
    ///
    /// Discards the previous gallery, its in-flight set and any earlier
    /// error. Completions still arriving for the old batch become no-ops.
    pub fn begin_extraction(&self) -> BatchId {
        let batch = BatchId::generate();

        self.tx.send_modify(|state| {
            *state = GalleryState {
                batch: Some(batch),
                phase: Phase::Extracting,
                ..GalleryState::default()
            };
        });

        tracing::debug!(%batch, "extraction started");
        batch
    }

    /// Record a failed extraction; the gallery stays empty
    pub fn fail_extraction(&self, batch: BatchId, message: impl Into<String>) {
        let message = message.into();

        self.tx.send_if_modified(|state| {
            if !state.is_current(batch) {
                return false;
            }
            state.phase = Phase::Idle;
            state.error = Some(message);
            true
        });
    }

    /// Install one placeholder dish per name, in order
    ///
    /// Blank names are skipped. Returns `None` when `batch` has already been
    /// superseded.
    pub fn seed(&self, batch: BatchId, names: Vec<String>) -> Option<Vec<Arc<Dish>>> {
        let dishes: Vec<Arc<Dish>> = names
            .into_iter()
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .map(|name| Arc::new(Dish::new(name)))
            .collect();

        let installed = self.tx.send_if_modified(|state| {
            if !state.is_current(batch) {
                return false;
            }
            state.dishes.clone_from(&dishes);
            state.in_flight.clear();
            state.phase = Phase::Generating;
            true
        });

        if installed {
            tracing::debug!(%batch, count = dishes.len(), "gallery seeded");
            Some(dishes)
        } else {
            tracing::debug!(%batch, "batch superseded before seeding");
            None
        }
    }

    /// Mark a dish's image request as started
    pub fn mark_generating(&self, batch: BatchId, id: DishId) -> bool {
        self.tx.send_if_modified(|state| {
            if !state.is_current(batch) || state.dish(id).is_none() {
                return false;
            }
            state.in_flight.insert(id)
        })
    }

    /// Settle a dish's image request
    ///
    /// Clears the in-flight mark and, on success, applies the image in the
    /// same update. Returns `false` if the batch was superseded.
    pub fn complete_generation(&self, batch: BatchId, id: DishId, image: Option<ImageArtifact>) -> bool {
        let applied = self.tx.send_if_modified(|state| {
            if !state.is_current(batch) {
                return false;
            }
            let was_in_flight = state.in_flight.remove(&id);
            let patched = image.is_some_and(|image| patch_image(&mut state.dishes, id, image));
            was_in_flight || patched
        });

        if !applied {
            tracing::debug!(%batch, dish = %id, "discarding completion for superseded batch");
        }
        applied
    }

    /// Replace the image of a dish in the current gallery
    ///
    /// Returns `false` if no dish with `id` is present any more.
    pub fn replace_image(&self, id: DishId, image: ImageArtifact) -> bool {
        self.tx.send_if_modified(|state| patch_image(&mut state.dishes, id, image))
    }

    /// Mark the batch as settled
    pub fn finish_batch(&self, batch: BatchId) {
        self.tx.send_if_modified(|state| {
            if !state.is_current(batch) || state.phase == Phase::Idle {
                return false;
            }
            state.phase = Phase::Idle;
            true
        });
    }
}

fn patch_image(dishes: &mut [Arc<Dish>], id: DishId, image: ImageArtifact) -> bool {
    match dishes.iter_mut().find(|d| d.id() == id) {
        Some(slot) => {
            *slot = Arc::new(slot.with_image(image));
            true
        }
        None => false,
    }
}
