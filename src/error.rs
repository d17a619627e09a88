//! Errors that abort a render session

use std::path::PathBuf;

/// Which external asset could not be acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Font,
    Logo,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Font => f.write_str("font"),
            AssetKind::Logo => f.write_str("logo"),
        }
    }
}

/// Errors produced while setting up or finishing a target
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// A required font or logo could not be read or decoded.
    #[error("missing {kind} asset at {}: {reason}", path.display())]
    MissingAsset {
        kind: AssetKind,
        path: PathBuf,
        reason: String,
    },

    /// The canvas would have no pixels.
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Encoding the finished picture failed.
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// PNG encoding failed.
    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    /// A configuration or shot file was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
