//! Target rendering module
//!
//! This module contains:
//! - Layout constants shared by all renderers
//! - The [`Surface`] seam every draw call goes through
//! - A raster [`canvas::Canvas`] using tiny-skia and rusttype
//! - The face, table and arrow renderers
//!
//! Renderers only ever talk to a `Surface`, in pixel coordinates that have
//! already been truncated from design units.

pub mod arrow;
pub mod canvas;
pub mod face;
pub mod geometry;
pub mod table;

#[cfg(test)]
pub(crate) mod recording;

use image::RgbaImage;

use crate::config::Rgba;
use crate::domain::{PixelPoint, PixelRect};

/// Where a text's reference point sits relative to the rendered string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Reference point is the left edge at ascender height
    LeftTop,
    /// Reference point is the horizontal and vertical middle
    Middle,
    /// Reference point is the right edge, vertically centered
    RightMiddle,
}

impl Anchor {
    /// Offset from the reference point to the pen origin (left edge, baseline)
    ///
    /// `descent` is negative below the baseline, as font metrics report it.
    pub fn pen_offset(self, width: f32, ascent: f32, descent: f32) -> (f32, f32) {
        let middle = (ascent + descent) * 0.5;
        match self {
            Anchor::LeftTop => (0.0, ascent),
            Anchor::Middle => (-width * 0.5, middle),
            Anchor::RightMiddle => (-width, middle),
        }
    }
}

/// Font size and anchoring for a piece of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub anchor: Anchor,
}

impl TextStyle {
    pub const fn new(size: f32, anchor: Anchor) -> Self {
        Self { size, anchor }
    }
}

/// Drawing primitives a target is rendered onto.
///
/// Calls must be applied in the order they are made: later draws paint over
/// earlier ones and translucent colors blend with what is already there.
/// Coordinates may lie outside the surface; implementations clip.
pub trait Surface {
    /// Width of the surface in pixels
    fn width(&self) -> u32;

    /// Ellipse inscribed in `bounds`, optionally filled, outlined 1px
    fn ellipse(&mut self, bounds: PixelRect, outline: Rgba, fill: Option<Rgba>);

    /// Rectangle outline of the given line width
    fn rectangle(&mut self, bounds: PixelRect, outline: Rgba, width: u32);

    /// Straight line of the given width
    fn line(&mut self, from: PixelPoint, to: PixelPoint, color: Rgba, width: u32);

    /// Single line of text
    fn text(&mut self, at: PixelPoint, text: &str, style: TextStyle, color: Rgba);

    /// Composite an image with its own alpha, top-left corner at `at`
    fn composite(&mut self, image: &RgbaImage, at: PixelPoint);
}
