use std::fmt;

use bytes::Bytes;

/// An encoded image and its media type
///
/// The bytes are carried opaquely; nothing in platecraft decodes pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    /// Encoded image payload (PNG, JPEG, ...)
    pub data: Bytes,
    /// MIME type of `data`, e.g. "image/png"
    pub media_type: String,
}

impl ImageArtifact {
    pub fn new(data: impl Into<Bytes>, media_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            media_type: media_type.into(),
        }
    }

    /// File extension matching the media type
    ///
    /// Unknown `image/*` subtypes are used as-is only when they are plain
    /// lowercase tokens; anything else falls back to `bin`.
    pub fn extension(&self) -> &str {
        match self.media_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/png" => "png",
            other => other
                .strip_prefix("image/")
                .filter(|subtype| is_token(subtype))
                .unwrap_or("bin"),
        }
    }
}

fn is_token(subtype: &str) -> bool {
    !subtype.is_empty()
        && !subtype.starts_with('.')
        && subtype
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'+' | b'.' | b'-'))
}

impl fmt::Debug for ImageArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageArtifact")
            .field("media_type", &self.media_type)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_follows_media_type() {
        assert_eq!(ImageArtifact::new(vec![1], "image/png").extension(), "png");
        assert_eq!(ImageArtifact::new(vec![1], "image/jpeg").extension(), "jpg");
        assert_eq!(ImageArtifact::new(vec![1], "image/avif").extension(), "avif");
        assert_eq!(ImageArtifact::new(vec![1], "application/octet-stream").extension(), "bin");
    }

    #[test]
    fn unsafe_subtype_falls_back_to_bin() {
        assert_eq!(ImageArtifact::new(vec![1], "image/svg+xml").extension(), "svg+xml");
        assert_eq!(ImageArtifact::new(vec![1], "image/svg/xml").extension(), "bin");
        assert_eq!(ImageArtifact::new(vec![1], "image/../../etc").extension(), "bin");
        assert_eq!(ImageArtifact::new(vec![1], "image/").extension(), "bin");
        assert_eq!(ImageArtifact::new(vec![1], "image/PNG; q=1").extension(), "bin");
    }

    #[test]
    fn debug_hides_payload() {
        let artifact = ImageArtifact::new(vec![0xAB; 64], "image/png");
        let rendered = format!("{artifact:?}");
        assert!(rendered.contains("len: 64"));
        assert!(!rendered.contains("171"));
    }
}
