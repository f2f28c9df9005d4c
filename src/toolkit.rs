//! Drawing backend probing and the install-and-retry entry sequence.

use std::{path::PathBuf, process::Command};

use anyhow::{bail, Context, Result};
use image::{Rgba, RgbaImage};

use crate::{
    config::IconConfig,
    draw::encode_png,
    error::GenerateError,
    glyphs::{load_default_glyphs, GlyphRenderer},
    icon_gen::generate_all,
};

/// The drawing capability the generator depends on.
pub trait Toolkit {
    /// Name reported in diagnostics and handed to the installer.
    fn name(&self) -> &str;

    /// Fails with [`GenerateError::DependencyUnavailable`] when the backend
    /// can't be used.
    fn probe(&self) -> Result<(), GenerateError>;

    /// The text capability, if a font is available.
    fn load_glyphs(&self, config: &IconConfig) -> Option<Box<dyn GlyphRenderer>>;
}

/// The compiled-in backend: `image` for rasters and PNG, `rusttype` for text.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageToolkit;

impl Toolkit for ImageToolkit {
    fn name(&self) -> &str {
        "image/png backend"
    }

    fn probe(&self) -> Result<(), GenerateError> {
        let pixel = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        encode_png(&pixel)
            .map(|_| ())
            .map_err(|e| GenerateError::DependencyUnavailable {
                name: self.name().to_string(),
                reason: e.to_string(),
            })
    }

    fn load_glyphs(&self, config: &IconConfig) -> Option<Box<dyn GlyphRenderer>> {
        load_default_glyphs(config).map(|glyphs| Box::new(glyphs) as Box<dyn GlyphRenderer>)
    }
}

/// Installs a missing drawing dependency.
pub trait Installer {
    fn install(&self, dependency: &str) -> Result<()>;
}

/// Runs the configured install command.
#[derive(Debug, Clone, Default)]
pub struct CommandInstaller {
    command: Option<Vec<String>>,
}

impl CommandInstaller {
    pub fn new(command: Option<Vec<String>>) -> Self {
        Self { command }
    }

    pub fn from_config(config: &IconConfig) -> Self {
        Self::new(config.install_command.clone())
    }
}

impl Installer for CommandInstaller {
    fn install(&self, dependency: &str) -> Result<()> {
        let Some((program, args)) = self.command.as_deref().and_then(|cmd| cmd.split_first())
        else {
            bail!("No install command configured for {dependency}");
        };

        tracing::debug!(%program, ?args, "running install command");
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to run install command '{program}'"))?;

        if !status.success() {
            bail!("Install command '{program}' for {dependency} exited with {status}");
        }
        Ok(())
    }
}

/// How a run ended when it didn't abort.
#[derive(Debug)]
pub enum RunOutcome {
    /// All icons were written.
    Generated(Vec<PathBuf>),
    /// Generation failed. Consumers fall back to their default icons.
    Degraded(GenerateError),
}

/// Generate all icons, recovering from a missing drawing dependency once.
///
/// Attempt, and on `DependencyUnavailable` install then reattempt. A failing
/// install or reattempt is returned as an error. Any other failure of the
/// first attempt is reported and tolerated.
pub fn run(
    config: &IconConfig,
    toolkit: &dyn Toolkit,
    installer: &dyn Installer,
) -> Result<RunOutcome> {
    match generate_all(config, toolkit) {
        Ok(paths) => Ok(RunOutcome::Generated(paths)),
        Err(GenerateError::DependencyUnavailable { name, reason }) => {
            tracing::debug!(%name, %reason, "drawing dependency unavailable");
            println!("❌ {name} not available. Installing...");

            installer
                .install(&name)
                .with_context(|| format!("Failed to install {name}"))?;
            let paths = generate_all(config, toolkit)
                .context("Icon generation failed after installing the drawing dependency")?;

            Ok(RunOutcome::Generated(paths))
        }
        Err(e) => Ok(RunOutcome::Degraded(report_degraded(e))),
    }
}

/// Print the tolerated-failure diagnostics.
pub fn report_degraded(e: GenerateError) -> GenerateError {
    println!("❌ Error creating icons: {e}");
    println!("💡 Continuing without custom icons - consumers will fall back to default icons");
    e
}
