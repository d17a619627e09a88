//! Font and logo acquisition
//!
//! Both are loaded once when a target is created. A missing font is always
//! fatal; a logo only when one is configured.

use std::path::Path;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use rusttype::Font;

use crate::config::{TargetConfig, resolve_asset};
use crate::domain::length_to_pixel;
use crate::error::{AssetKind, TargetError};
use crate::render::geometry::page;

/// External resources a target is drawn with
pub struct Assets {
    pub font: Font<'static>,
    /// Logo, already shrunk to fit its corner
    pub logo: Option<RgbaImage>,
}

impl Assets {
    /// Load the configured font and logo for a canvas at `scale`
    pub fn load(config: &TargetConfig, scale: f64) -> Result<Self, TargetError> {
        let font = load_font(&config.font)?;
        let logo = match &config.logo {
            Some(path) => {
                let max = length_to_pixel(page::LOGO_SIZE, scale).max(1) as u32;
                Some(thumbnail(load_logo(path)?, max))
            }
            None => None,
        };
        Ok(Self { font, logo })
    }
}

fn missing(kind: AssetKind, path: &Path, reason: impl ToString) -> TargetError {
    TargetError::MissingAsset {
        kind,
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Read and parse a TrueType font
pub fn load_font(path: &Path) -> Result<Font<'static>, TargetError> {
    let path = resolve_asset(path);
    let data = std::fs::read(&path).map_err(|e| missing(AssetKind::Font, &path, e))?;
    let font = Font::try_from_vec(data)
        .ok_or_else(|| missing(AssetKind::Font, &path, "not a TrueType font"))?;
    log::debug!("Loaded font {}", path.display());
    Ok(font)
}

/// Read and decode a logo image
pub fn load_logo(path: &Path) -> Result<RgbaImage, TargetError> {
    let path = resolve_asset(path);
    let logo = image::open(&path)
        .map_err(|e| missing(AssetKind::Logo, &path, e))?
        .to_rgba8();
    log::debug!(
        "Loaded logo {} ({}x{})",
        path.display(),
        logo.width(),
        logo.height()
    );
    Ok(logo)
}

/// Shrink `image` to fit a `max`×`max` box, keeping its aspect ratio.
///
/// Images that already fit are returned unchanged, never enlarged.
pub fn thumbnail(image: RgbaImage, max: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w <= max && h <= max {
        return image;
    }
    let ratio = (f64::from(max) / f64::from(w)).min(f64::from(max) / f64::from(h));
    let nw = ((f64::from(w) * ratio).round() as u32).clamp(1, max);
    let nh = ((f64::from(h) * ratio).round() as u32).clamp(1, max);
    imageops::resize(&image, nw, nh, FilterType::Lanczos3)
}
