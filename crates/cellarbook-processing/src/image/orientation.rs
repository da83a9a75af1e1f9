use exif::{In, Reader, Tag};
use image::DynamicImage;
use std::io::Cursor;

/// EXIF orientation (tag 0x0112) and the transform that makes the pixels upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageOrientation {
    #[default]
    Normal,
    MirroredHorizontal,
    Rotated180,
    MirroredVertical,
    /// Transposed across the main diagonal.
    MirroredHorizontalAnd270CW,
    Rotated90CW,
    /// Transposed across the anti-diagonal.
    MirroredHorizontalAnd90CW,
    Rotated270CW,
}

impl From<u32> for ImageOrientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Self::MirroredHorizontal,
            3 => Self::Rotated180,
            4 => Self::MirroredVertical,
            5 => Self::MirroredHorizontalAnd270CW,
            6 => Self::Rotated90CW,
            7 => Self::MirroredHorizontalAnd90CW,
            8 => Self::Rotated270CW,
            _ => Self::Normal,
        }
    }
}

impl ImageOrientation {
    /// Read the orientation tag from an encoded image.
    ///
    /// Missing, unreadable or out-of-range tags are treated as [`ImageOrientation::Normal`].
    pub fn from_exif(data: &[u8]) -> Self {
        let mut cursor = Cursor::new(data);
        Reader::new()
            .read_from_container(&mut cursor)
            .ok()
            .and_then(|exif| {
                exif.get_field(Tag::Orientation, In::PRIMARY)
                    .and_then(|field| field.value.get_uint(0))
            })
            .map(Self::from)
            .unwrap_or_default()
    }

    /// Rotate/flip `img` so that it displays upright without the tag.
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        if self != Self::Normal {
            tracing::debug!(orientation = ?self, "Applying EXIF orientation");
        }

        match self {
            Self::Normal => img,
            Self::MirroredHorizontal => img.fliph(),
            Self::Rotated180 => img.rotate180(),
            Self::MirroredVertical => img.flipv(),
            Self::MirroredHorizontalAnd270CW => img.rotate90().fliph(),
            Self::Rotated90CW => img.rotate90(),
            Self::MirroredHorizontalAnd90CW => img.rotate270().fliph(),
            Self::Rotated270CW => img.rotate270(),
        }
    }
}
