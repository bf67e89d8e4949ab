//! Presentation styles for dish photographs
//!
//! The style table is static data: each variant maps to a fixed prompt
//! fragment that is appended to every dish prompt in a batch.

use serde::Deserialize;
use strum::{Display, EnumIter, EnumString};

/// Closed set of photograph styles
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum ImageStyle {
    /// Moody, dark wood, cast iron
    #[strum(to_string = "Rustic/Dark", serialize = "rustic-dark")]
    RusticDark,
    /// Minimalist, light backgrounds, natural light
    #[default]
    #[strum(to_string = "Bright/Modern", serialize = "bright-modern")]
    BrightModern,
    /// Top-down flat lay with lifestyle props
    #[strum(to_string = "Social Media", serialize = "social-media")]
    SocialMedia,
}

impl ImageStyle {
    /// Descriptive prompt fragment for this style
    pub const fn description(self) -> &'static str {
        match self {
            Self::RusticDark => {
                "A rustic and dark food photography style. Moody lighting, dark wooden surfaces, cast iron pans, \
                 vintage silverware, and a warm, cozy atmosphere. Focus on texture and deep colors."
            }
            Self::BrightModern => {
                "A bright, clean, and modern food photography style. Minimalist composition, white or light-colored \
                 backgrounds, natural light, sharp focus, and vibrant colors. The aesthetic is fresh and airy."
            }
            Self::SocialMedia => {
                "A trendy, top-down 'flat lay' food photography style, perfect for social media. The dish is arranged \
                 neatly on a surface, shot directly from above. Often includes hands in the shot, or other props like \
                 drinks or phones to create a lifestyle feel. Bright and colorful."
            }
        }
    }

    /// Full image generation prompt for one dish in this style
    pub fn dish_prompt(self, dish_name: &str) -> String {
        format!(
            "Generate an ultra-realistic, high-end, professional food photograph of: \"{dish_name}\". \
             The style should be: {}. The image must be appetizing and look like it's from a top restaurant's \
             marketing campaign. Pay close attention to lighting, composition, and detail.",
            self.description()
        )
    }
}
