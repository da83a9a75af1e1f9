use image::RgbImage;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, thiserror::Error)]
pub enum CompressionError {
    #[error("JPEG encoder failed: {0}")]
    Encoder(#[from] std::io::Error),

    #[error("JPEG encoder aborted")]
    Aborted,
}

/// Compress to JPEG using mozjpeg
///
/// Output is baseline (non-progressive) JPEG with optimized Huffman tables.
/// `quality` is clamped to 1..=100.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, CompressionError> {
    let (width, height) = img.dimensions();
    let quality = quality.clamp(1, 100);

    // libjpeg reports fatal errors by unwinding through the Rust callbacks.
    panic::catch_unwind(AssertUnwindSafe(|| -> Result<Vec<u8>, CompressionError> {
        let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
        comp.set_size(width as usize, height as usize);
        comp.set_quality(quality as f32);
        comp.set_optimize_coding(true);

        let mut comp = comp.start_compress(Vec::new())?;
        comp.write_scanlines(img.as_raw())?;
        Ok(comp.finish()?)
    }))
    .unwrap_or(Err(CompressionError::Aborted))
}
