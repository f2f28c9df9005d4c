//! Optional text capability.
//!
//! Text rendering depends on a font being present on the machine. The
//! generator receives it as `Option<&dyn GlyphRenderer>` and simply skips the
//! glyph when the capability is missing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::{config::IconConfig, draw::blend_pixel};

/// Fonts tried, in order, when no `font_path` is configured.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansSymbols2-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansSymbols2-Regular.ttf",
    "/usr/share/fonts/truetype/ancient-scripts/Symbola_hint.ttf",
    "/usr/share/fonts/TTF/Symbola.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\seguisym.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Pixel height used to check whether a font covers the glyph text.
const COVERAGE_CHECK_PX: f32 = 32.0;

/// Ink bounding box of a laid-out string, in pixels, relative to the
/// top-left corner of the line box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TextBounds {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    fn union(self, other: TextBounds) -> TextBounds {
        TextBounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

pub trait GlyphRenderer {
    /// Bounds of `text` at `px` pixel height laid out from `(0, 0)`, or `None`
    /// when nothing in it would be drawn.
    fn measure(&self, text: &str, px: f32) -> Option<TextBounds>;

    /// Draw `text` with its line box's top-left corner at `origin`.
    fn draw(&self, img: &mut RgbaImage, text: &str, px: f32, origin: (i32, i32), color: Rgba<u8>);
}

/// Glyph rendering backed by a TrueType/OpenType font.
pub struct FontGlyphs {
    font: Font<'static>,
    source: PathBuf,
}

impl FontGlyphs {
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font {}", path.display()))?;
        let font = Font::try_from_vec(data)
            .with_context(|| format!("Not a usable font: {}", path.display()))?;

        Ok(Self {
            font,
            source: path.to_path_buf(),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Lay out `text`, dropping characters the font has no glyph for.
    fn layout(&self, text: &str, px: f32, (x, y): (i32, i32)) -> Vec<PositionedGlyph<'_>> {
        let scale = Scale::uniform(px);
        let ascent = self.font.v_metrics(scale).ascent;

        self.font
            .layout(text, scale, point(x as f32, y as f32 + ascent))
            .filter(|glyph| glyph.id().0 != 0)
            .collect()
    }
}

impl GlyphRenderer for FontGlyphs {
    fn measure(&self, text: &str, px: f32) -> Option<TextBounds> {
        self.layout(text, px, (0, 0))
            .iter()
            .filter_map(|glyph| glyph.pixel_bounding_box())
            .map(|bb| TextBounds {
                min_x: bb.min.x,
                min_y: bb.min.y,
                max_x: bb.max.x,
                max_y: bb.max.y,
            })
            .reduce(TextBounds::union)
    }

    fn draw(&self, img: &mut RgbaImage, text: &str, px: f32, origin: (i32, i32), color: Rgba<u8>) {
        for glyph in self.layout(text, px, origin) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    let x = bb.min.x as i64 + gx as i64;
                    let y = bb.min.y as i64 + gy as i64;
                    blend_pixel(img, x, y, color, coverage);
                });
            }
        }
    }
}

/// Load the font used for the centered glyph.
///
/// Uses `font_path` when configured, otherwise walks [`SYSTEM_FONT_CANDIDATES`]
/// and prefers the first font that can render `glyph_text`. When none covers
/// it, the first readable font is kept. Returns `None` when no font loads.
pub fn load_default_glyphs(config: &IconConfig) -> Option<FontGlyphs> {
    let candidates: Vec<PathBuf> = match &config.font_path {
        Some(path) => vec![path.clone()],
        None => SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
    };

    let mut fallback = None;
    for path in &candidates {
        if !path.is_file() {
            continue;
        }
        match FontGlyphs::from_file(path) {
            Ok(glyphs) if glyphs.measure(&config.glyph_text, COVERAGE_CHECK_PX).is_some() => {
                tracing::debug!(font = %path.display(), "loaded glyph font");
                return Some(glyphs);
            }
            Ok(glyphs) => {
                tracing::debug!(font = %path.display(), "font lacks glyphs for text");
                fallback.get_or_insert(glyphs);
            }
            Err(e) => tracing::warn!("{e:#}"),
        }
    }

    match fallback {
        Some(glyphs) => {
            tracing::warn!(
                font = %glyphs.source().display(),
                text = %config.glyph_text,
                "no font covers the glyph text, using first readable font"
            );
            Some(glyphs)
        }
        None => {
            tracing::warn!("no usable font found, icons will be drawn without text");
            None
        }
    }
}
