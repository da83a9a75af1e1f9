use image::{DynamicImage, RgbImage, RgbaImage};
use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

/// Decode the primary image of a HEIF/HEIC container.
///
/// libheif applies the container's rotation and mirror properties itself, so
/// the returned image is already upright.
pub fn decode_heif(data: &[u8]) -> Result<DynamicImage, String> {
    let lib = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(data).map_err(|e| e.to_string())?;
    let handle = ctx.primary_image_handle().map_err(|e| e.to_string())?;

    let has_alpha = handle.has_alpha_channel();
    let (chroma, channels) = if has_alpha {
        (RgbChroma::Rgba, 4usize)
    } else {
        (RgbChroma::Rgb, 3usize)
    };

    let decoded = lib
        .decode(&handle, ColorSpace::Rgb(chroma), None)
        .map_err(|e| e.to_string())?;
    let plane = decoded
        .planes()
        .interleaved
        .ok_or_else(|| "HEIF image has no interleaved plane".to_string())?;

    let width = plane.width;
    let height = plane.height;
    let row_len = width as usize * channels;

    // Rows may be padded; copy them out tightly packed.
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for y in 0..height as usize {
        let start = y * plane.stride;
        let row = plane
            .data
            .get(start..start + row_len)
            .ok_or_else(|| "HEIF plane is shorter than its dimensions".to_string())?;
        pixels.extend_from_slice(row);
    }

    let img = if has_alpha {
        RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8)
    } else {
        RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8)
    };

    img.ok_or_else(|| "HEIF pixel buffer does not match its dimensions".to_string())
}
