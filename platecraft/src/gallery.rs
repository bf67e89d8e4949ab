//! Writes a settled gallery to disk and renders its summary

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use platecraft_core::{Dish, GalleryState};

/// Files produced by [`write_images`]
#[derive(Debug, Default)]
pub struct WrittenGallery {
    pub written: Vec<PathBuf>,
    /// Dish name and reason for each image that could not be written
    pub failed: Vec<(String, String)>,
}

/// Write every dish image in `state` into `dir`
///
/// Files are named `<position>-<slug>.<ext>` so they sort in menu order.
/// Dishes without an image are skipped. A failed write is recorded and the
/// remaining dishes are still written.
pub fn write_images(state: &GalleryState, dir: &Path) -> anyhow::Result<WrittenGallery> {
    std::fs::create_dir_all(dir).map_err(|e| anyhow::anyhow!("failed to create {}: {e}", dir.display()))?;

    let mut out = WrittenGallery::default();

    for (position, dish) in state.dishes().iter().enumerate() {
        let Some(image) = dish.image() else {
            continue;
        };

        let path = dir.join(format!("{:02}-{}.{}", position + 1, slug(dish.name()), image.extension()));

        match std::fs::write(&path, &image.data) {
            Ok(()) => {
                tracing::debug!(dish = %dish.name(), path = %path.display(), "image written");
                out.written.push(path);
            }
            Err(e) => {
                tracing::warn!(dish = %dish.name(), path = %path.display(), error = %e, "failed to write image");
                out.failed.push((dish.name().to_owned(), format!("{}: {e}", path.display())));
            }
        }
    }

    Ok(out)
}

/// One line per dish: image status and name
pub fn summary(state: &GalleryState) -> String {
    let mut out = String::new();

    for dish in state.dishes() {
        let _ = writeln!(out, "{:<12} {}", status(state, dish), dish.name());
    }

    out
}

fn status(state: &GalleryState, dish: &Dish) -> &'static str {
    if state.is_generating(dish.id()) {
        "generating"
    } else if dish.has_image() {
        "ready"
    } else {
        "no image"
    }
}

/// File-name-safe lowercase form of a dish name
fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() { "dish".to_owned() } else { slug }
}
