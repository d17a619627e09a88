//! Surface that records draw calls instead of rasterizing them

use image::RgbaImage;

use super::{Surface, TextStyle};
use crate::config::Rgba;
use crate::domain::{PixelPoint, PixelRect};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Ellipse {
        bounds: PixelRect,
        outline: Rgba,
        fill: Option<Rgba>,
    },
    Rectangle {
        bounds: PixelRect,
        outline: Rgba,
        width: u32,
    },
    Line {
        from: PixelPoint,
        to: PixelPoint,
        color: Rgba,
        width: u32,
    },
    Text {
        at: PixelPoint,
        text: String,
        style: TextStyle,
        color: Rgba,
    },
    Composite {
        at: PixelPoint,
        width: u32,
        height: u32,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            calls: Vec::new(),
        }
    }

    /// All text strings in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn ellipse(&mut self, bounds: PixelRect, outline: Rgba, fill: Option<Rgba>) {
        self.calls.push(DrawCall::Ellipse {
            bounds,
            outline,
            fill,
        });
    }

    fn rectangle(&mut self, bounds: PixelRect, outline: Rgba, width: u32) {
        self.calls.push(DrawCall::Rectangle {
            bounds,
            outline,
            width,
        });
    }

    fn line(&mut self, from: PixelPoint, to: PixelPoint, color: Rgba, width: u32) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn text(&mut self, at: PixelPoint, text: &str, style: TextStyle, color: Rgba) {
        self.calls.push(DrawCall::Text {
            at,
            text: text.to_string(),
            style,
            color,
        });
    }

    fn composite(&mut self, image: &RgbaImage, at: PixelPoint) {
        self.calls.push(DrawCall::Composite {
            at,
            width: image.width(),
            height: image.height(),
        });
    }
}
