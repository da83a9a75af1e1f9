use cellarbook_core::BoundingBox;
use image::{imageops, imageops::FilterType, RgbImage};

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Calculate the largest dimensions that fit inside `bounds` while
    /// preserving the aspect ratio.
    ///
    /// Never upscales: an image already inside the box keeps its size.
    pub fn fit_dimensions(orig_width: u32, orig_height: u32, bounds: BoundingBox) -> (u32, u32) {
        if bounds.contains(orig_width, orig_height) {
            return (orig_width, orig_height);
        }

        let scale = f64::min(
            bounds.width as f64 / orig_width as f64,
            bounds.height as f64 / orig_height as f64,
        );

        let width = ((orig_width as f64 * scale).round() as u32).clamp(1, bounds.width);
        let height = ((orig_height as f64 * scale).round() as u32).clamp(1, bounds.height);
        (width, height)
    }

    /// Shrink `img` to fit inside `bounds`, returning it unchanged if it already fits.
    pub fn fit_within(img: RgbImage, bounds: BoundingBox) -> RgbImage {
        let (orig_width, orig_height) = img.dimensions();
        let (width, height) = Self::fit_dimensions(orig_width, orig_height, bounds);

        if (width, height) == (orig_width, orig_height) {
            return img;
        }

        tracing::debug!(
            from_width = orig_width,
            from_height = orig_height,
            to_width = width,
            to_height = height,
            "Resizing image"
        );
        imageops::resize(&img, width, height, FilterType::Lanczos3)
    }
}
