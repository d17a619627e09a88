//! Direction arrow drawn next to each score, pointing toward the center

use super::Surface;
use super::geometry::arrow;
use crate::config::Rgba;
use crate::domain::{DesignPoint, Shot, angle_between, to_pixel};

/// Arrow in design units: shaft plus two wings meeting at the tip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGlyph {
    pub tail: DesignPoint,
    pub tip: DesignPoint,
    pub wings: [DesignPoint; 2],
}

/// Rotate a row vector by the matrix `[[cos, -sin], [sin, cos]]`
#[inline]
fn rotate(v: [f64; 2], cos: f64, sin: f64) -> [f64; 2] {
    [v[0] * cos + v[1] * sin, -v[0] * sin + v[1] * cos]
}

/// Calculate the arrow for `shot`, centered on `at`
///
/// Returns None when the shot sits exactly in the center and no direction
/// exists.
pub fn glyph(at: DesignPoint, shot: &Shot) -> Option<ArrowGlyph> {
    // Toward the center, not away from it
    let direction = [-shot.x(), -shot.y()];
    let angle = angle_between([1.0, 0.0], direction);
    if angle.is_nan() {
        return None;
    }

    let (sin, cos) = angle.sin_cos();
    let place = |v: [f64; 2]| {
        let [x, y] = rotate(v, cos, sin);
        at.offset(x, y)
    };

    Some(ArrowGlyph {
        tail: place([-arrow::SIZE, 0.0]),
        tip: place([arrow::SIZE, 0.0]),
        wings: [place([0.0, arrow::SIZE]), place([0.0, -arrow::SIZE])],
    })
}

/// Draw the arrow for `shot`, skipping shots without a direction
pub fn draw_arrow<S: Surface>(surface: &mut S, at: DesignPoint, shot: &Shot, scale: f64) {
    let Some(glyph) = glyph(at, shot) else {
        log::debug!("Shot at center has no direction, arrow skipped");
        return;
    };

    let tip = to_pixel(glyph.tip, scale);
    surface.line(to_pixel(glyph.tail, scale), tip, Rgba::BLACK, arrow::WIDTH_PX);
    for wing in glyph.wings {
        surface.line(tip, to_pixel(wing, scale), Rgba::BLACK, arrow::WIDTH_PX);
    }
}
