use std::fmt;

use platecraft_gateway::ImageArtifact;
use uuid::Uuid;

/// Opaque dish identifier, unique even when two dishes share a name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DishId(Uuid);

impl DishId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One menu item and its photograph, once there is one
///
/// `id` and `name` never change; a new image produces a new `Dish`
/// value with the same identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dish {
    id: DishId,
    name: String,
    image: Option<ImageArtifact>,
}

impl Dish {
    pub(crate) fn new(name: String) -> Self {
        Self {
            id: DishId::generate(),
            name,
            image: None,
        }
    }

    pub const fn id(&self) -> DishId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn image(&self) -> Option<&ImageArtifact> {
        self.image.as_ref()
    }

    pub const fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub(crate) fn with_image(&self, image: ImageArtifact) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            image: Some(image),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_gets_distinct_ids() {
        let a = Dish::new("Soup".to_owned());
        let b = Dish::new("Soup".to_owned());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn with_image_keeps_identity() {
        let dish = Dish::new("Tiramisu".to_owned());
        let patched = dish.with_image(ImageArtifact::new(vec![1, 2, 3], "image/png"));

        assert_eq!(patched.id(), dish.id());
        assert_eq!(patched.name(), "Tiramisu");
        assert!(patched.has_image());
        assert!(!dish.has_image());
    }
}
