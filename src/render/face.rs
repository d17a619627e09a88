//! Target face: rings, ring values, headline and logo
//!
//! The rings rely on overpainting. The 4-point disc is filled in ring
//! color and the inner rings are then carved back out of it in background
//! color, so the calls below must stay in this order.

use image::RgbaImage;

use super::geometry::{page, ring};
use super::{Anchor, Surface, TextStyle};
use crate::config::Rgba;
use crate::domain::{DesignPoint, PixelRect, to_pixel};

/// Ring face of one target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Target center in design units
    pub center: DesignPoint,
    /// Pixels per design unit
    pub scale: f64,
    pub background: Rgba,
    pub ring: Rgba,
}

impl Face {
    /// Pixel bounding box of ring `index` (0 is the center disc)
    pub fn ring_bounds(&self, index: u32) -> PixelRect {
        let r = ring::radius(index);
        PixelRect::from_design(
            self.center.offset(-r, -r),
            self.center.offset(r, r),
            self.scale,
        )
    }

    /// Label anchors of ring `index`: right, left, below and above center
    pub fn label_positions(&self, index: u32) -> [DesignPoint; 4] {
        let d = ring::label_distance(index);
        [
            self.center.offset(d, 0.0),
            self.center.offset(-d, 0.0),
            self.center.offset(0.0, d),
            self.center.offset(0.0, -d),
        ]
    }

    /// Draw all ring boundaries, outermost first
    pub fn draw_rings<S: Surface>(&self, surface: &mut S) {
        for index in (ring::FILLED + 1..=ring::OUTER).rev() {
            surface.ellipse(self.ring_bounds(index), self.ring, None);
        }

        surface.ellipse(self.ring_bounds(ring::FILLED), self.ring, Some(self.ring));

        for index in (1..ring::FILLED).rev() {
            surface.ellipse(self.ring_bounds(index), self.background, None);
        }

        surface.ellipse(self.ring_bounds(0), self.background, Some(self.background));
    }

    /// Print ring values along the four axes
    pub fn draw_labels<S: Surface>(&self, surface: &mut S) {
        let style = TextStyle::new(page::LABEL_FONT_PX, Anchor::Middle);
        for direction in 0..4 {
            for index in (ring::LAST_LABELED..=ring::OUTER).rev() {
                // Labels on the filled disc are printed in paper color
                let color = if index > ring::FILLED {
                    self.ring
                } else {
                    self.background
                };
                let at = self.label_positions(index)[direction];
                let value = 10 - index;
                surface.text(to_pixel(at, self.scale), &value.to_string(), style, color);
            }
        }
    }
}

/// Draw the headline in the top-left corner
pub fn draw_headline<S: Surface>(surface: &mut S, headline: &str, scale: f64) {
    let at = to_pixel(DesignPoint::new(page::MARGIN, page::MARGIN), scale);
    surface.text(
        at,
        headline,
        TextStyle::new(page::HEADLINE_FONT_PX, Anchor::LeftTop),
        Rgba::BLACK,
    );
}

/// Top-left corner of the logo, inset from the top-right canvas corner
pub fn logo_position(canvas_width: u32, scale: f64) -> DesignPoint {
    let design_width = (f64::from(canvas_width) / scale).floor();
    DesignPoint::new(
        design_width - page::LOGO_SIZE - page::LOGO_BORDER,
        page::LOGO_BORDER,
    )
}

/// Composite an already thumbnailed logo
pub fn draw_logo<S: Surface>(surface: &mut S, logo: &RgbaImage, scale: f64) {
    let at = logo_position(surface.width(), scale);
    surface.composite(logo, to_pixel(at, scale));
}
