//! Layout constants shared by the face, table and arrow renderers
//!
//! Lengths are in design units (tenths of a millimeter) unless the name
//! says otherwise. Font sizes are in pixels and do not scale with the canvas.

/// Ring geometry
pub mod ring {
    /// Distance between neighbouring ring boundaries
    pub const SPACE: f64 = 250.0;
    /// Extra radius on every ring, also the radius of the center disc
    pub const OFFSET: f64 = 25.0;
    /// Outermost ring index
    pub const OUTER: u32 = 9;
    /// The filled "4-point" ring; everything inside starts in ring color
    pub const FILLED: u32 = 6;
    /// Labels sit this far inside their ring, as a fraction of `SPACE`
    pub const LABEL_INSET: f64 = 0.4;
    /// Innermost ring that still gets a label
    pub const LAST_LABELED: u32 = 2;

    /// Radius of ring `index`
    #[inline]
    pub fn radius(index: u32) -> f64 {
        f64::from(index) * SPACE + OFFSET
    }

    /// Distance of the label of ring `index` from center
    #[inline]
    pub fn label_distance(index: u32) -> f64 {
        (f64::from(index) - LABEL_INSET) * SPACE
    }
}

/// Page furniture around the face
pub mod page {
    /// Outer margin
    pub const MARGIN: f64 = 250.0;
    /// Height reserved for the headline
    pub const HEADLINE: f64 = 400.0;
    /// Headline font size in pixels
    pub const HEADLINE_FONT_PX: f32 = 168.0;
    /// Ring label font size in pixels
    pub const LABEL_FONT_PX: f32 = 48.0;
    /// Logo is thumbnailed into a square of this size
    pub const LOGO_SIZE: f64 = 750.0;
    /// Gap between the logo and the top-right corner
    pub const LOGO_BORDER: f64 = 50.0;
}

/// Shot markers and the mean-point cross
pub mod marker {
    /// Radius of a shot marker
    pub const SHOT_RADIUS: f64 = 225.0;
    /// Half-length of each arm of the center cross (2 mm)
    pub const CROSS_SIZE: f64 = 50.0;
    /// Center cross line width in pixels
    pub const CROSS_WIDTH_PX: u32 = 2;
}

/// Results table
pub mod table {
    /// Edge length of a score cell (72 mm)
    pub const CELL: f64 = 720.0;
    /// Scores per row
    pub const COLUMNS: usize = 5;
    /// Half of the table width, measured from the target center
    pub const HALF_WIDTH: f64 = 2250.0;
    /// Width of the summary column
    pub const SUM_COLUMN: f64 = 900.0;
    /// Width of the single cell in teiler-only mode
    pub const TEILER_COLUMN: f64 = 1200.0;
    /// Text keeps this distance from the right cell edge
    pub const TEXT_MARGIN: f64 = 40.0;
    /// Table font size in pixels
    pub const FONT_PX: f32 = 142.0;
    /// Thick border line width in pixels
    pub const BORDER_PX: u32 = 6;
    /// Label in front of the grand total
    pub const SUM_LABEL: &str = "Summe:";
    /// Label in front of the best teiler
    pub const TEILER_LABEL: &str = "Teiler:";
}

/// Direction arrow glyph
pub mod arrow {
    /// Half-length of the shaft, also the wing offset
    pub const SIZE: f64 = 60.0;
    /// Line width in pixels
    pub const WIDTH_PX: u32 = 2;
}

/// Shape rasterization constants
pub mod shape {
    /// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
    pub const BEZIER_K: f32 = 0.552_284_8;
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}

/// Calculate ellipse center and radii from bounding box
#[inline]
pub fn ellipse_from_bounds(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> (f32, f32, f32, f32) {
    let cx = (min_x + max_x) * 0.5;
    let cy = (min_y + max_y) * 0.5;
    let rx = ((max_x - min_x) * 0.5).max(1.0);
    let ry = ((max_y - min_y) * 0.5).max(1.0);
    (cx, cy, rx, ry)
}
