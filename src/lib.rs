//! Placeholder icon generation: a blue tile with an inset gold plate and a
//! centered shield glyph, written as PNG files at a fixed list of sizes.

pub mod config;
pub mod draw;
pub mod error;
pub mod glyphs;
pub mod icon_gen;
pub mod toolkit;

pub use config::{IconConfig, Palette};
pub use error::GenerateError;
pub use icon_gen::{create_icon, generate_all, render_icon};
pub use toolkit::{run, CommandInstaller, ImageToolkit, Installer, RunOutcome, Toolkit};
