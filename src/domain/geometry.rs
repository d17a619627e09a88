//! Design-space and pixel-space geometry
//!
//! Everything on a target is laid out in design units (tenths of a
//! millimeter) and only converted to pixels at the moment it is drawn.

use std::f64::consts::TAU;

/// Width of the target face in design units (500 mm)
pub const DESIGN_WIDTH: f64 = 5000.0;

/// A point in design units, origin wherever the caller puts it
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DesignPoint {
    pub x: f64,
    pub y: f64,
}

impl DesignPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate the point by the given offset
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A point on the raster, already truncated to whole pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel-space bounding box (may lie partly or fully outside the canvas)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    /// Create a new rectangle from coordinates
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Convert two design-space corners to a pixel rectangle
    pub fn from_design(top_left: DesignPoint, bottom_right: DesignPoint, scale: f64) -> Self {
        let a = to_pixel(top_left, scale);
        let b = to_pixel(bottom_right, scale);
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Get the width of the rectangle
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Convert a design-space point to pixels.
///
/// Each component is multiplied by `scale` and truncated toward zero.
/// There is no rounding and no clipping: ring and label alignment depend on
/// the truncation, and off-canvas coordinates are the surface's problem.
#[inline]
pub fn to_pixel(point: DesignPoint, scale: f64) -> PixelPoint {
    PixelPoint {
        x: (point.x * scale) as i32,
        y: (point.y * scale) as i32,
    }
}

/// Convert a single design-space length to pixels (truncating)
#[inline]
pub fn length_to_pixel(length: f64, scale: f64) -> i32 {
    (length * scale) as i32
}

/// Rotation from `a` to `b` in `[0, 2π)`.
///
/// The unsigned angle comes from the dot product of the normalized vectors;
/// the sign of the 2-D cross product picks between the short and the long
/// way round. Either input being the zero vector yields NaN.
pub fn angle_between(a: [f64; 2], b: [f64; 2]) -> f64 {
    let na = (a[0] * a[0] + a[1] * a[1]).sqrt();
    let nb = (b[0] * b[0] + b[1] * b[1]).sqrt();
    let ua = [a[0] / na, a[1] / na];
    let ub = [b[0] / nb, b[1] / nb];

    let dot = ua[0] * ub[0] + ua[1] * ub[1];
    let cross = ua[0] * ub[1] - ua[1] * ub[0];
    // Clamp against rounding just past ±1, NaN passes through untouched
    let unsigned = dot.clamp(-1.0, 1.0).acos();
    if cross < 0.0 {
        unsigned
    } else {
        TAU - unsigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_to_pixel_truncates_toward_zero() {
        assert_eq!(to_pixel(DesignPoint::new(1249.0, 999.9), 0.2), PixelPoint::new(249, 199));
        assert_eq!(to_pixel(DesignPoint::new(-1249.0, -7.0), 0.2), PixelPoint::new(-249, -1));
    }

    #[test]
    fn test_to_pixel_passes_out_of_canvas_through() {
        let p = to_pixel(DesignPoint::new(-90000.0, 90000.0), 0.5);
        assert_eq!(p, PixelPoint::new(-45000, 45000));
    }

    #[test]
    fn test_rect_from_design() {
        let r = PixelRect::from_design(
            DesignPoint::new(100.0, 200.0),
            DesignPoint::new(600.0, 700.0),
            0.2,
        );
        assert_eq!(r, PixelRect::new(20, 40, 120, 140));
        assert_eq!(r.width(), 100);
        assert_eq!(r.height(), 100);
    }

    #[test]
    fn test_length_to_pixel() {
        assert_eq!(length_to_pixel(720.0, 0.2), 144);
        assert_eq!(length_to_pixel(250.0, 0.2), 50);
        assert_eq!(length_to_pixel(400.0, 0.333), 133);
    }

    #[test]
    fn test_angle_between_quarter_turns() {
        let base = [1.0, 0.0];
        // Pointing left: half turn either way
        assert!((angle_between(base, [-1.0, 0.0]) - PI).abs() < 1e-12);
        // Negative cross product takes the short way
        assert!((angle_between(base, [0.0, -1.0]) - FRAC_PI_2).abs() < 1e-12);
        // Positive cross product takes the long way
        assert!((angle_between(base, [0.0, 1.0]) - 3.0 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_angle_between_is_scale_invariant() {
        let a = angle_between([1.0, 0.0], [-3.0, -4.0]);
        let b = angle_between([5.0, 0.0], [-300.0, -400.0]);
        assert!((a - b).abs() < 1e-12);
        assert!((0.0..TAU).contains(&a));
    }

    #[test]
    fn test_angle_between_same_direction() {
        // Zero cross product is not negative, so the result is a full turn
        let a = angle_between([1.0, 0.0], [2.0, 0.0]);
        assert!((a - TAU).abs() < 1e-12);
    }

    #[test]
    fn test_angle_between_zero_vector_is_nan() {
        assert!(angle_between([1.0, 0.0], [0.0, 0.0]).is_nan());
        assert!(angle_between([0.0, 0.0], [1.0, 0.0]).is_nan());
    }
}
