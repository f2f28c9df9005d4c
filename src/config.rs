//! Generation settings.
//!
//! Every value the generator needs lives in [`IconConfig`], so callers and
//! tests can override sizes, paths and colors without touching process-wide
//! state. Defaults come from the embedded `config/default.toml`.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use image::Rgba;
use serde::Deserialize;

use crate::error::GenerateError;

const DEFAULTS: &str = include_str!("../config/default.toml");

/// Environment prefix, e.g. `PLACEHOLDER_ICONS__OUTPUT_DIR=dist/icons`.
pub const ENV_PREFIX: &str = "PLACEHOLDER_ICONS";
/// Optional config file looked up in the working directory.
pub const LOCAL_FILE: &str = "placeholder-icons";
/// Environment variable naming an extra config file.
pub const CONFIG_PATH_VAR: &str = "PLACEHOLDER_ICONS_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct IconConfig {
    /// Directory receiving the PNG files; created when missing.
    pub output_dir: PathBuf,
    /// Square pixel sizes to render, in order.
    pub sizes: Vec<u32>,
    /// File name stem, files are written as `<prefix>-<size>.png`.
    pub file_prefix: String,
    /// Tile color (CSS syntax).
    pub background: String,
    /// Inset rounded plate color (CSS syntax).
    pub accent: String,
    /// Glyph fill color (CSS syntax).
    pub glyph_color: String,
    /// Text drawn at the center of the plate.
    pub glyph_text: String,
    /// Smallest icon size that gets the glyph.
    pub glyph_min_size: u32,
    /// Glyph pixel height as a fraction of the icon size.
    pub glyph_ratio: f32,
    /// Explicit font file. When unset the usual system locations are searched.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    /// Program and arguments used to install a missing drawing dependency.
    #[serde(default)]
    pub install_command: Option<Vec<String>>,
}

/// Resolved, fully opaque drawing colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba<u8>,
    pub accent: Rgba<u8>,
    pub glyph: Rgba<u8>,
}

impl Default for IconConfig {
    fn default() -> Self {
        ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
            .build()
            .and_then(|cfg| cfg.try_deserialize::<IconConfig>())
            .expect("embedded default config is valid")
    }
}

impl IconConfig {
    /// Same settings with another output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Same settings with another size list.
    pub fn with_sizes(mut self, sizes: impl Into<Vec<u32>>) -> Self {
        self.sizes = sizes.into();
        self
    }

    /// Path of the icon file for `size`.
    pub fn icon_path(&self, size: u32) -> PathBuf {
        self.output_dir
            .join(format!("{}-{}.png", self.file_prefix, size))
    }

    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.sizes.is_empty() {
            return Err(GenerateError::InvalidConfig(
                "sizes must list at least one icon size".to_string(),
            ));
        }
        if let Some(size) = self.sizes.iter().find(|&&s| s == 0) {
            return Err(GenerateError::InvalidConfig(format!(
                "icon size must be positive, got {size}"
            )));
        }
        if self.file_prefix.is_empty() {
            return Err(GenerateError::InvalidConfig(
                "file_prefix must not be empty".to_string(),
            ));
        }
        if !(self.glyph_ratio > 0.0 && self.glyph_ratio <= 1.0) {
            return Err(GenerateError::InvalidConfig(format!(
                "glyph_ratio must be in (0, 1], got {}",
                self.glyph_ratio
            )));
        }
        self.palette().map(|_| ())
    }

    pub fn palette(&self) -> Result<Palette, GenerateError> {
        Ok(Palette {
            background: parse_color("background", &self.background)?,
            accent: parse_color("accent", &self.accent)?,
            glyph: parse_color("glyph_color", &self.glyph_color)?,
        })
    }
}

/// Parses a CSS color into an opaque pixel.
fn parse_color(field: &str, value: &str) -> Result<Rgba<u8>, GenerateError> {
    let color = css_color::Srgb::from_str(value).map_err(|_| {
        GenerateError::InvalidConfig(format!("{field}: '{value}' is not a CSS color"))
    })?;

    Ok(Rgba([
        channel(color.red),
        channel(color.green),
        channel(color.blue),
        255,
    ]))
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Loads the layered configuration: embedded defaults, `placeholder-icons.toml`
/// in the working directory, the file named by `PLACEHOLDER_ICONS_CONFIG`,
/// then `PLACEHOLDER_ICONS__*` environment variables.
pub fn load() -> anyhow::Result<IconConfig> {
    let _ = dotenvy::dotenv();

    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        .add_source(::config::File::with_name(LOCAL_FILE).required(false));

    if let Ok(custom_path) = std::env::var(CONFIG_PATH_VAR) {
        builder = builder.add_source(::config::File::from(Path::new(&custom_path)).required(true));
    }

    builder = builder.add_source(
        ::config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("sizes")
            .with_list_parse_key("install_command"),
    );

    let cfg: IconConfig = builder.build()?.try_deserialize()?;
    cfg.validate()?;
    tracing::debug!(?cfg, "configuration loaded");
    Ok(cfg)
}
