//! Render session configuration

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// RGBA color, 8 bits per channel, straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Same color with the alpha channel forced to fully opaque
    pub fn opaque(self) -> Self {
        Self { a: 0xff, ..self }
    }

    /// Convert to image crate RGBA format
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::from_hex(&value).ok_or_else(|| format!("invalid color `{value}`"))
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_string()
    }
}

/// Paper color behind the rings and the table
pub const BACKGROUND: Rgba = Rgba::rgb(0xf6, 0xdd, 0xa5);
/// Crosshair marking the mean point of impact
pub const CENTER_CROSS: Rgba = Rgba::rgb(0x33, 0x33, 0xff);

/// Target type, selects the ring color and the table mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    #[default]
    Default,
    Green,
    /// Only the best teiler is reported, never per-shot values
    Red,
}

impl TargetKind {
    /// Color of the rings and the filled 4-point disc
    pub fn ring_color(self) -> Rgba {
        match self {
            TargetKind::Default => Rgba::BLACK,
            TargetKind::Green => Rgba::rgb(0x01, 0x4c, 0x2d),
            TargetKind::Red => Rgba::rgb(0x71, 0x22, 0x27),
        }
    }

    /// Whether the results table collapses to the single "Teiler" cell
    pub fn is_teiler_only(self) -> bool {
        matches!(self, TargetKind::Red)
    }
}

impl std::str::FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "b" | "black" => Ok(TargetKind::Default),
            "green" | "g" => Ok(TargetKind::Green),
            "red" | "r" => Ok(TargetKind::Red),
            other => Err(format!("unknown target kind `{other}`")),
        }
    }
}

/// Encoded output format of the finished picture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Bmp => "bmp",
        }
    }

    /// Matching image crate format
    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}

/// Everything needed to start one render session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Canvas width in pixels, also fixes the scale factor
    #[serde(default = "default_width")]
    pub width: u32,
    /// Canvas height in pixels before table and headline space is added
    #[serde(default = "default_height")]
    pub height: u32,
    /// Shots to reserve table space for up front
    #[serde(default)]
    pub expected_shots: usize,
    #[serde(default)]
    pub kind: TargetKind,
    /// Text above the target face, empty means none
    #[serde(default)]
    pub headline: Option<String>,
    /// Blend translucent colors (shot markers) instead of painting them opaque
    #[serde(default = "default_transparent")]
    pub transparent: bool,
    /// TrueType font used for every text element
    #[serde(default = "default_font")]
    pub font: PathBuf,
    /// Logo composited into the top-right corner
    #[serde(default)]
    pub logo: Option<PathBuf>,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    1000
}

fn default_transparent() -> bool {
    true
}

fn default_font() -> PathBuf {
    PathBuf::from("arial.ttf")
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            expected_shots: 0,
            kind: TargetKind::default(),
            headline: None,
            transparent: default_transparent(),
            font: default_font(),
            logo: None,
            format: OutputFormat::default(),
        }
    }
}

impl TargetConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, TargetError> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!(
                    "Error loading config {}, using defaults: {}",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Headline text, if there is any worth drawing
    pub fn headline(&self) -> Option<&str> {
        self.headline.as_deref().filter(|h| !h.is_empty())
    }
}

/// Find an asset on disk.
///
/// Paths that exist as given win; relative paths are then tried in the
/// user's font directory. The path is returned unchanged if nothing matches
/// so the caller can report it.
pub fn resolve_asset(path: &Path) -> PathBuf {
    if path.exists() || path.is_absolute() {
        return path.to_path_buf();
    }
    dirs::font_dir()
        .map(|dir| dir.join(path))
        .filter(|candidate| candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rgba_from_hex() {
        assert_eq!(Rgba::from_hex("#f6dda5"), Some(Rgba::rgb(0xf6, 0xdd, 0xa5)));
        assert_eq!(
            Rgba::from_hex("ff0000bb"),
            Some(Rgba::rgba(0xff, 0x00, 0x00, 0xbb))
        );
        assert_eq!(Rgba::from_hex("#fff"), None);
        assert_eq!(Rgba::from_hex("#gg0000"), None);
    }

    #[test]
    fn test_rgba_display_round_trips_alpha() {
        assert_eq!(Rgba::rgb(0x01, 0x4c, 0x2d).to_string(), "#014c2d");
        assert_eq!(Rgba::rgba(0xff, 0xff, 0x00, 0xbb).to_string(), "#ffff00bb");
    }

    #[test]
    fn test_rgba_opaque() {
        assert_eq!(Rgba::rgba(1, 2, 3, 4).opaque(), Rgba::rgb(1, 2, 3));
    }

    #[test]
    fn test_kind_ring_colors() {
        assert_eq!(TargetKind::Default.ring_color(), Rgba::BLACK);
        assert_eq!(TargetKind::Green.ring_color().to_string(), "#014c2d");
        assert_eq!(TargetKind::Red.ring_color().to_string(), "#712227");
        assert!(TargetKind::Red.is_teiler_only());
        assert!(!TargetKind::Green.is_teiler_only());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("r".parse::<TargetKind>(), Ok(TargetKind::Red));
        assert_eq!("Green".parse::<TargetKind>(), Ok(TargetKind::Green));
        assert_eq!("b".parse::<TargetKind>(), Ok(TargetKind::Default));
        assert!("blue".parse::<TargetKind>().is_err());
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: TargetConfig = serde_json::from_str(r#"{ "width": 2000, "kind": "red" }"#)
            .expect("valid config");
        assert_eq!(config.width, 2000);
        assert_eq!(config.height, 1000);
        assert_eq!(config.kind, TargetKind::Red);
        assert!(config.transparent);
        assert_eq!(config.format, OutputFormat::Png);
        assert_eq!(config.font, PathBuf::from("arial.ttf"));
    }

    #[test]
    fn test_empty_headline_is_none() {
        let config = TargetConfig {
            headline: Some(String::new()),
            ..TargetConfig::default()
        };
        assert_eq!(config.headline(), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{ "width": 500, "height": 600, "headline": "Kreismeisterschaft", "format": "jpeg" }}"#
        )
        .expect("write config");

        let config = TargetConfig::load(file.path()).expect("load config");
        assert_eq!(config.width, 500);
        assert_eq!(config.height, 600);
        assert_eq!(config.headline(), Some("Kreismeisterschaft"));
        assert_eq!(config.format, OutputFormat::Jpeg);
    }

    #[test]
    fn test_load_or_default_on_garbage() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write config");
        assert_eq!(TargetConfig::load_or_default(file.path()), TargetConfig::default());
    }

    #[test]
    fn test_resolve_asset_keeps_missing_path() {
        let path = Path::new("definitely-not-here-4711.ttf");
        assert_eq!(resolve_asset(path), path.to_path_buf());
    }
}
