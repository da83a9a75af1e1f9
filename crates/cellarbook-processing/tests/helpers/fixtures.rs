use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).expect("encode fixture");
    out.into_inner()
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

/// Opaque RGB JPEG
pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Jpeg)
}

/// Opaque RGB PNG
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Png)
}

/// Fully transparent RGBA PNG
pub fn create_transparent_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

/// JPEG carrying an EXIF orientation tag.
pub fn create_oriented_jpeg(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    let jpeg = create_test_jpeg(width, height);
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "fixture must start with SOI");

    // Big-endian TIFF with a single IFD0 entry: Orientation (0x0112), SHORT, count 1.
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());

    let mut app1 = Vec::new();
    app1.extend_from_slice(b"Exif\x00\x00");
    app1.extend_from_slice(&tiff);

    let mut out = Vec::with_capacity(jpeg.len() + app1.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Bytes that no decoder accepts.
pub fn corrupted_image() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.extend_from_slice(b"this is not really a jpeg");
    data
}

/// An ISO-BMFF `ftyp` box with the `heic` brand and no image data behind it.
pub fn heic_header() -> Vec<u8> {
    let mut data = vec![0, 0, 0, 24];
    data.extend_from_slice(b"ftypheic");
    data.extend_from_slice(&[0, 0, 0, 0]);
    data.extend_from_slice(b"mif1heic");
    data.extend_from_slice(&[0; 64]);
    data
}

/// HEVC-coded HEIC, or `None` when libheif was built without an HEVC encoder.
#[cfg(feature = "heif")]
pub fn create_test_heic(width: u32, height: u32) -> Option<Vec<u8>> {
    use libheif_rs::{
        Channel, ColorSpace, CompressionFormat, EncoderQuality, HeifContext, Image, LibHeif,
        RgbChroma,
    };

    let lib = LibHeif::new();
    let mut encoder = lib.encoder_for_format(CompressionFormat::Hevc).ok()?;
    encoder.set_quality(EncoderQuality::Lossy(80)).expect("set quality");

    let mut image =
        Image::new(width, height, ColorSpace::Rgb(RgbChroma::Rgb)).expect("allocate image");
    image
        .create_plane(Channel::Interleaved, width, height, 8)
        .expect("allocate plane");

    let pixels = gradient(width, height);
    {
        let planes = image.planes_mut();
        let mut plane = planes.interleaved.expect("interleaved plane");
        let row_len = width as usize * 3;
        for (y, row) in pixels.as_raw().chunks(row_len).enumerate() {
            let start = y * plane.stride;
            plane.data[start..start + row_len].copy_from_slice(row);
        }
    }

    let mut ctx = HeifContext::new().expect("heif context");
    ctx.encode_image(&image, &mut encoder, None)
        .expect("encode heic");
    Some(ctx.write_to_bytes().expect("serialize heic"))
}
