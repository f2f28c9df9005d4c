//! Raster primitives used to compose an icon.

use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, ImageResult, Rgba, RgbaImage,
};

/// Allocate a `size`×`size` canvas filled with `color`.
pub fn canvas(size: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(size, size, color)
}

/// Fill the rectangle spanning `(x0, y0)` to `(x1, y1)`, both corners
/// inclusive, with circular corners of `radius` pixels.
///
/// The radius is capped at half the shorter side. Anything outside the canvas
/// is clipped, and an inverted rectangle draws nothing.
pub fn fill_rounded_rect(
    img: &mut RgbaImage,
    (x0, y0): (i64, i64),
    (x1, y1): (i64, i64),
    radius: i64,
    color: Rgba<u8>,
) {
    if x1 < x0 || y1 < y0 {
        return;
    }

    let radius = radius.max(0).min((x1 - x0) / 2).min((y1 - y0) / 2);
    let r2 = radius * radius;

    let x_start = x0.max(0);
    let y_start = y0.max(0);
    let x_end = x1.min(img.width() as i64 - 1);
    let y_end = y1.min(img.height() as i64 - 1);

    for y in y_start..=y_end {
        // Nearest corner center on this row, equal to y inside the straight band
        let cy = y.clamp(y0 + radius, y1 - radius);
        for x in x_start..=x_end {
            let cx = x.clamp(x0 + radius, x1 - radius);
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Alpha-blend `color` over the pixel at `(x, y)` with the given coverage.
/// The destination alpha is left untouched, so an opaque canvas stays opaque.
pub fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }

    let coverage = coverage.clamp(0.0, 1.0) * (color[3] as f32 / 255.0);
    let pixel = img.get_pixel_mut(x as u32, y as u32);
    for channel in 0..3 {
        let dst = pixel[channel] as f32;
        let src = color[channel] as f32;
        pixel[channel] = (dst + (src - dst) * coverage).round() as u8;
    }
}

/// Encode an RGBA canvas as PNG with the best compression setting.
///
/// The encoder embeds no timestamps, so equal canvases give equal bytes.
pub fn encode_png(img: &RgbaImage) -> ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buf, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)?;
    Ok(buf)
}
