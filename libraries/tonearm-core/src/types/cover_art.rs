/// Embedded cover image
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Attached picture extracted from a track's tag
///
/// `data` is a shared blob handle: cloning a `CoverArt` (or a `Track` holding
/// one) never copies the image bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverArt {
    /// MIME type as declared by the tag (e.g. `image/jpeg`), may be empty
    pub mime_type: String,

    /// Picture type byte (3 = front cover)
    pub picture_type: u8,

    /// Free-form description
    pub description: String,

    /// Raw image bytes
    pub data: Arc<[u8]>,
}

impl CoverArt {
    /// Picture type for the front cover
    pub const FRONT_COVER: u8 = 3;

    /// Create cover art from raw parts
    pub fn new(
        mime_type: impl Into<String>,
        picture_type: u8,
        description: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            mime_type: mime_type.into(),
            picture_type,
            description: description.into(),
            data: data.into(),
        }
    }

    /// Whether this picture is tagged as the front cover
    pub fn is_front_cover(&self) -> bool {
        self.picture_type == Self::FRONT_COVER
    }

    /// Size of the image payload in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the image payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_image_bytes() {
        let art = CoverArt::new("image/png", 3, "", vec![1u8, 2, 3]);
        let copy = art.clone();
        assert!(Arc::ptr_eq(&art.data, &copy.data));
        assert!(copy.is_front_cover());
        assert_eq!(copy.len(), 3);
    }
}
