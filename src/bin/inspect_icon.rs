use anyhow::{bail, Context, Result};
use image::io::Reader as ImageReader;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "public/assets/icon-128.png".to_string());

    let img = ImageReader::open(&path)
        .with_context(|| format!("Failed to open {path}"))?
        .decode()
        .with_context(|| format!("Failed to decode {path}"))?;

    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();

    println!("Inspecting icon: {}", path);
    println!("Image dimensions: {}x{}", width, height);
    if width != height {
        println!("⚠ Icon is not square");
    }

    let samples = sample_points(width, height)?;

    for (label, x, y) in samples {
        let p = rgba_img.get_pixel(x, y);
        println!(
            "  {:<12} (x={}, y={}): RGBA [{}, {}, {}, {}]",
            label, x, y, p[0], p[1], p[2], p[3]
        );
    }

    let translucent = rgba_img.pixels().filter(|p| p[3] != 255).count();
    if translucent == 0 {
        println!("✓ Fully opaque");
    } else {
        println!("⚠ {} pixels are not fully opaque", translucent);
    }

    Ok(())
}

/// Corner, plate edge and center coordinates of a `width`×`height` icon.
fn sample_points(width: u32, height: u32) -> Result<[(&'static str, u32, u32); 6]> {
    if width == 0 || height == 0 {
        bail!("Icon is empty ({width}x{height})");
    }

    let last_x = width - 1;
    let last_y = height - 1;
    Ok([
        ("top-left", 0, 0),
        ("top-right", last_x, 0),
        ("bottom-left", 0, last_y),
        ("bottom-right", last_x, last_y),
        ("plate edge", (width / 8 + 1).min(last_x), height / 2),
        ("center", width / 2, height / 2),
    ])
}

#[cfg(test)]
mod tests {
    use super::sample_points;

    #[test]
    fn test_empty_icon_is_rejected() {
        assert!(sample_points(0, 0).is_err());
        assert!(sample_points(16, 0).is_err());
    }

    #[test]
    fn test_samples_stay_inside_small_icons() {
        for (width, height) in [(1, 1), (2, 2), (16, 16)] {
            for (label, x, y) in sample_points(width, height).unwrap() {
                assert!(x < width && y < height, "{label} at ({x}, {y}) in {width}x{height}");
            }
        }
    }
}
