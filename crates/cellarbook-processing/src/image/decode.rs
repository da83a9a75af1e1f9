use super::orientation::ImageOrientation;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// ISO-BMFF major brands used by HEIF/HEIC still images.
const HEIF_BRANDS: [&[u8; 4]; 8] = [
    b"heic", b"heix", b"heim", b"heis", b"hevc", b"hevx", b"mif1", b"msf1",
];

/// Whether `data` starts with an ISO-BMFF `ftyp` box carrying a HEIF brand.
pub fn is_heif(data: &[u8]) -> bool {
    if data.len() < 12 || &data[4..8] != b"ftyp" {
        return false;
    }
    HEIF_BRANDS.iter().any(|brand| &data[8..12] == *brand)
}

/// Decode `data` by content, not by the declared extension, and return an
/// upright image.
pub fn decode_upright(data: &[u8]) -> Result<DynamicImage, String> {
    if is_heif(data) {
        return decode_heif(data);
    }

    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| e.to_string())?
        .decode()
        .map_err(|e| e.to_string())?;

    Ok(ImageOrientation::from_exif(data).apply(img))
}

#[cfg(feature = "heif")]
fn decode_heif(data: &[u8]) -> Result<DynamicImage, String> {
    super::heif::decode_heif(data)
}

#[cfg(not(feature = "heif"))]
fn decode_heif(_data: &[u8]) -> Result<DynamicImage, String> {
    Err("HEIF decoding is not enabled in this build".to_string())
}
