use image::{DynamicImage, Rgb, RgbImage};

const BACKGROUND: [u8; 3] = [255, 255, 255];

/// Convert any decoded image to 8-bit RGB.
///
/// Transparent pixels are composited over a white background rather than
/// having their alpha dropped, so transparent regions do not turn black.
pub fn flatten_to_rgb(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        let blend = |channel: u8, background: u8| -> u8 {
            ((channel as u32 * alpha + background as u32 * (255 - alpha) + 127) / 255) as u8
        };
        out.put_pixel(
            x,
            y,
            Rgb([
                blend(r, BACKGROUND[0]),
                blend(g, BACKGROUND[1]),
                blend(b, BACKGROUND[2]),
            ]),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    #[test]
    fn test_transparent_becomes_white() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        let out = flatten_to_rgb(DynamicImage::ImageRgba8(img));
        assert!(out.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_opaque_pixels_preserved() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let out = flatten_to_rgb(DynamicImage::ImageRgba8(img));
        assert_eq!(out.get_pixel(1, 1).0, [10, 20, 30]);
    }

    #[test]
    fn test_half_alpha_blends() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let out = flatten_to_rgb(DynamicImage::ImageRgba8(img));
        let value = out.get_pixel(0, 0).0[0];
        assert!((126..=128).contains(&value), "got {}", value);
    }

    #[test]
    fn test_grayscale_expands_to_rgb() {
        let img = GrayImage::from_pixel(2, 1, Luma([42]));
        let out = flatten_to_rgb(DynamicImage::ImageLuma8(img));
        assert_eq!(out.get_pixel(0, 0).0, [42, 42, 42]);
    }
}
