//! Raster surface using tiny-skia for shapes and rusttype for text
//!
//! The canvas starts fully opaque and every operation is source-over, so the
//! pixmap never holds partially transparent pixels and premultiplied data is
//! identical to straight RGBA.

use std::io::{self, Cursor};

use image::RgbaImage;
use rusttype::{Font, Scale, point};
use tiny_skia::{
    ColorU8, FillRule, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

use super::geometry::{self, shape};
use super::{Surface, TextStyle};
use crate::config::{OutputFormat, Rgba};
use crate::domain::{PixelPoint, PixelRect};
use crate::error::TargetError;

/// Exclusive raster target of one render session
pub struct Canvas {
    pixmap: Pixmap,
    /// Blend translucent colors; otherwise they are painted opaque
    blend: bool,
    font: Option<Font<'static>>,
}

impl Canvas {
    /// Create a canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Rgba, blend: bool) -> Result<Self, TargetError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(TargetError::InvalidDimensions { width, height })?;
        let bg = background.opaque();
        pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        log::debug!("Canvas created: {}x{} pixels, blend={}", width, height, blend);
        Ok(Self {
            pixmap,
            blend,
            font: None,
        })
    }

    /// Use `font` for all text drawn on this canvas
    pub fn with_font(mut self, font: Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Read back a pixel, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Color as it will actually be painted
    fn effective(&self, color: Rgba) -> Rgba {
        if self.blend { color } else { color.opaque() }
    }

    fn paint(&self, color: Rgba) -> Paint<'static> {
        let c = self.effective(color);
        let mut paint = Paint::default();
        paint.set_color_rgba8(c.r, c.g, c.b, c.a);
        paint.anti_alias = true;
        paint
    }

    /// Convert into a straight-alpha RGBA image
    pub fn into_image(self) -> Result<RgbaImage, TargetError> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let data: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaImage::from_raw(width, height, data)
            .ok_or(TargetError::InvalidDimensions { width, height })
    }

    /// Encode the finished canvas
    pub fn encode(self, format: OutputFormat) -> Result<Vec<u8>, TargetError> {
        let image = self.into_image()?;
        let mut bytes = Vec::new();
        match format {
            OutputFormat::Png => write_png(&mut bytes, &image)?,
            other => {
                // JPEG has no alpha channel and the canvas is opaque anyway
                let rgb = image::DynamicImage::ImageRgba8(image).to_rgb8();
                image::DynamicImage::ImageRgb8(rgb)
                    .write_to(&mut Cursor::new(&mut bytes), other.image_format())?;
            }
        }
        log::debug!("Encoded {} bytes as {:?}", bytes.len(), format);
        Ok(bytes)
    }
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Build an ellipse path using cubic bezier curves
fn build_ellipse_path(cx: f32, cy: f32, rx: f32, ry: f32) -> Option<tiny_skia::Path> {
    let kx = rx * shape::BEZIER_K;
    let ky = ry * shape::BEZIER_K;

    let mut pb = PathBuilder::new();

    // Start at top
    pb.move_to(cx, cy - ry);

    // Top to right
    pb.cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);

    // Right to bottom
    pb.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);

    // Bottom to left
    pb.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);

    // Left to top
    pb.cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);

    pb.close();
    pb.finish()
}

/// Source-over one straight-alpha color onto an opaque RGBA buffer
fn blend_pixel(data: &mut [u8], width: u32, x: u32, y: u32, rgb: [u8; 3], alpha: f32) {
    let idx = (y as usize * width as usize + x as usize) * 4;
    let Some(dst) = data.get_mut(idx..idx + 4) else {
        return;
    };
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha >= 0.999 {
        dst.copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        return;
    }
    let inv = 1.0 - alpha;
    for (d, s) in dst.iter_mut().zip(rgb) {
        *d = (s as f32 * alpha + *d as f32 * inv).round() as u8;
    }
    dst[3] = 255;
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn ellipse(&mut self, bounds: PixelRect, outline: Rgba, fill: Option<Rgba>) {
        let (min_x, min_y, max_x, max_y) = geometry::normalize_rect(
            bounds.left as f32,
            bounds.top as f32,
            bounds.right as f32,
            bounds.bottom as f32,
        );
        // Bounds are inclusive pixel indices, the path runs through pixel centers
        let (cx, cy, rx, ry) =
            geometry::ellipse_from_bounds(min_x + 0.5, min_y + 0.5, max_x + 0.5, max_y + 0.5);
        let Some(path) = build_ellipse_path(cx, cy, rx, ry) else {
            return;
        };

        if let Some(fill) = fill {
            let paint = self.paint(fill);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        let paint = self.paint(outline);
        let stroke = Stroke {
            width: 1.0,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn rectangle(&mut self, bounds: PixelRect, outline: Rgba, width: u32) {
        let (min_x, min_y, max_x, max_y) = geometry::normalize_rect(
            bounds.left as f32,
            bounds.top as f32,
            bounds.right as f32 + 1.0,
            bounds.bottom as f32 + 1.0,
        );
        // The border grows inward from the bounds
        let inset = width.max(1) as f32 * 0.5;

        let mut pb = PathBuilder::new();
        pb.move_to(min_x + inset, min_y + inset);
        pb.line_to(max_x - inset, min_y + inset);
        pb.line_to(max_x - inset, max_y - inset);
        pb.line_to(min_x + inset, max_y - inset);
        pb.close();
        let Some(path) = pb.finish() else {
            return;
        };

        let paint = self.paint(outline);
        let stroke = Stroke {
            width: width.max(1) as f32,
            line_cap: LineCap::Square,
            line_join: LineJoin::Miter,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn line(&mut self, from: PixelPoint, to: PixelPoint, color: Rgba, width: u32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32 + 0.5, from.y as f32 + 0.5);
        pb.line_to(to.x as f32 + 0.5, to.y as f32 + 0.5);
        let Some(path) = pb.finish() else {
            return;
        };

        let paint = self.paint(color);
        let stroke = Stroke {
            width: width.max(1) as f32,
            line_cap: LineCap::Butt,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn text(&mut self, at: PixelPoint, text: &str, style: TextStyle, color: Rgba) {
        let color = self.effective(color);
        let Self { pixmap, font, .. } = self;
        let Some(font) = font.as_ref() else {
            log::warn!("No font loaded, skipping text {:?}", text);
            return;
        };

        let scale = Scale::uniform(style.size);
        let v_metrics = font.v_metrics(scale);
        let advance = font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        let (dx, dy) = style
            .anchor
            .pen_offset(advance, v_metrics.ascent, v_metrics.descent);
        let origin = point(at.x as f32 + dx, at.y as f32 + dy);

        let (width, height) = (pixmap.width(), pixmap.height());
        let data = pixmap.data_mut();
        let rgb = [color.r, color.g, color.b];
        let alpha = color.a as f32 / 255.0;
        for glyph in font.layout(text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                    blend_pixel(data, width, px as u32, py as u32, rgb, coverage * alpha);
                }
            });
        }
    }

    fn composite(&mut self, image: &RgbaImage, at: PixelPoint) {
        let Some(overlay) = premultiplied_pixmap(image) else {
            return;
        };
        self.pixmap.draw_pixmap(
            at.x,
            at.y,
            overlay.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

/// Convert a straight-alpha image into a premultiplied pixmap
fn premultiplied_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;
    let data = image
        .pixels()
        .flat_map(|p| {
            let [r, g, b, a] = p.0;
            let c = ColorU8::from_rgba(r, g, b, a).premultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Pixmap::from_vec(data, size)
}
