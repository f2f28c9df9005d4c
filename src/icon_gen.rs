use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use image::RgbaImage;

use crate::{
    config::{IconConfig, Palette},
    draw::{canvas, encode_png, fill_rounded_rect},
    error::GenerateError,
    glyphs::GlyphRenderer,
    toolkit::Toolkit,
};

/// Compose the icon for `size` in memory.
///
/// Blue tile, a gold rounded plate inset by `size / 8` with `size / 10`
/// corners, and, from `glyph_min_size` up, the glyph centered on the tile.
/// Text calls are never made below `glyph_min_size`.
pub fn render_icon(
    size: u32,
    config: &IconConfig,
    palette: &Palette,
    glyphs: Option<&dyn GlyphRenderer>,
) -> RgbaImage {
    let mut img = canvas(size, palette.background);

    let size_i = size as i64;
    let margin = size_i / 8;
    let radius = size_i / 10;
    fill_rounded_rect(
        &mut img,
        (margin, margin),
        (size_i - margin, size_i - margin),
        radius,
        palette.accent,
    );

    if size >= config.glyph_min_size {
        if let Some(glyphs) = glyphs {
            draw_centered_glyph(&mut img, size, config, palette, glyphs);
        }
    }

    img
}

fn draw_centered_glyph(
    img: &mut RgbaImage,
    size: u32,
    config: &IconConfig,
    palette: &Palette,
    glyphs: &dyn GlyphRenderer,
) {
    let px = size as f32 * config.glyph_ratio;
    let Some(bounds) = glyphs.measure(&config.glyph_text, px) else {
        tracing::debug!(size, text = %config.glyph_text, "font has no glyphs for text");
        return;
    };

    // Center the ink box, not the line box
    let x = (size as i32 - bounds.width()).div_euclid(2) - bounds.min_x;
    let y = (size as i32 - bounds.height()).div_euclid(2) - bounds.min_y;
    glyphs.draw(img, &config.glyph_text, px, (x, y), palette.glyph);
}

/// Render one icon and write it to `output_path`, replacing any existing file.
pub fn create_icon(
    size: u32,
    output_path: &Path,
    config: &IconConfig,
    glyphs: Option<&dyn GlyphRenderer>,
) -> Result<(), GenerateError> {
    let palette = config.palette()?;
    let img = render_icon(size, config, &palette, glyphs);

    let bytes = encode_png(&img).map_err(|source| GenerateError::Encode {
        path: output_path.to_path_buf(),
        source,
    })?;
    std::fs::write(output_path, bytes).map_err(|source| GenerateError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;

    println!("Created {}", output_path.display());
    Ok(())
}

/// Write every configured size into the output directory.
///
/// Unrelated files already in the directory are left alone. Returns the
/// written paths in size order.
pub fn generate_all(
    config: &IconConfig,
    toolkit: &dyn Toolkit,
) -> Result<Vec<PathBuf>, GenerateError> {
    config.validate()?;
    toolkit.probe()?;

    create_dir_all(&config.output_dir).map_err(|source| GenerateError::CreateDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let glyphs = toolkit.load_glyphs(config);
    let glyphs = glyphs.as_deref();

    let mut written = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        let icon_path = config.icon_path(size);
        create_icon(size, &icon_path, config, glyphs)?;
        written.push(icon_path);
    }

    println!("✅ Basic PNG icons created!");
    println!("🎨 For production, replace with professionally designed icons");

    Ok(written)
}
